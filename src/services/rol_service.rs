// src/services/rol_service.rs

use crate::{
    common::error::AppError,
    db::RolRepository,
    models::{
        auditoria::AccionAuditoria,
        rol::{Rol, MAX_ID_ROL_PROTEGIDO},
        usuario::Claims,
    },
    services::auditoria_service::AuditoriaService,
};

#[derive(Clone)]
pub struct RolService {
    rol_repo: RolRepository,
    auditoria: AuditoriaService,
}

impl RolService {
    pub fn new(rol_repo: RolRepository, auditoria: AuditoriaService) -> Self {
        Self { rol_repo, auditoria }
    }

    pub async fn listar(&self) -> Result<Vec<Rol>, AppError> {
        self.rol_repo.listar().await
    }

    pub async fn crear(
        &self,
        nombre: &str,
        descripcion: Option<&str>,
        actor: &Claims,
    ) -> Result<Rol, AppError> {
        let rol = self.rol_repo.crear(nombre, descripcion).await?;

        self.auditoria
            .registrar(
                actor.sub,
                AccionAuditoria::Crear,
                "roles",
                Some(rol.id),
                &format!("Alta de rol '{}'", rol.nombre),
            )
            .await?;

        Ok(rol)
    }

    // Los tres roles integrados nunca se eliminan; tampoco un rol que algún
    // usuario todavía referencia.
    pub async fn eliminar(&self, id: i64, actor: &Claims) -> Result<(), AppError> {
        if id <= MAX_ID_ROL_PROTEGIDO {
            return Err(AppError::RolProtegido);
        }
        if self.rol_repo.contar_usuarios_con_rol(id).await? > 0 {
            return Err(AppError::EnUso("El rol"));
        }
        if self.rol_repo.eliminar(id).await? == 0 {
            return Err(AppError::NoEncontrado("El rol"));
        }

        self.auditoria
            .registrar(
                actor.sub,
                AccionAuditoria::Eliminar,
                "roles",
                Some(id),
                &format!("Eliminación de rol {id}"),
            )
            .await?;

        Ok(())
    }
}
