// src/services/empleado_service.rs

use crate::{
    common::error::AppError,
    db::EmpleadoRepository,
    models::{auditoria::AccionAuditoria, empleado::{Empleado, GuardarEmpleadoPayload}, usuario::Claims},
    services::auditoria_service::AuditoriaService,
};

#[derive(Clone)]
pub struct EmpleadoService {
    empleado_repo: EmpleadoRepository,
    auditoria: AuditoriaService,
}

impl EmpleadoService {
    pub fn new(empleado_repo: EmpleadoRepository, auditoria: AuditoriaService) -> Self {
        Self { empleado_repo, auditoria }
    }

    pub async fn listar(&self) -> Result<Vec<Empleado>, AppError> {
        self.empleado_repo.listar().await
    }

    pub async fn crear(
        &self,
        payload: GuardarEmpleadoPayload,
        actor: &Claims,
    ) -> Result<Empleado, AppError> {
        let empleado = self
            .empleado_repo
            .crear(
                &payload.documento,
                &payload.nombre,
                payload.cargo.as_deref(),
                payload.area.as_deref(),
            )
            .await?;

        self.auditoria
            .registrar(
                actor.sub,
                AccionAuditoria::Crear,
                "empleados",
                Some(empleado.id),
                &format!("Alta de empleado '{}'", empleado.nombre),
            )
            .await?;

        Ok(empleado)
    }

    pub async fn actualizar(
        &self,
        id: i64,
        payload: GuardarEmpleadoPayload,
        actor: &Claims,
    ) -> Result<Empleado, AppError> {
        let empleado = self
            .empleado_repo
            .actualizar(
                id,
                &payload.documento,
                &payload.nombre,
                payload.cargo.as_deref(),
                payload.area.as_deref(),
            )
            .await?
            .ok_or(AppError::NoEncontrado("El empleado"))?;

        self.auditoria
            .registrar(
                actor.sub,
                AccionAuditoria::Actualizar,
                "empleados",
                Some(empleado.id),
                &format!("Actualización de empleado '{}'", empleado.nombre),
            )
            .await?;

        Ok(empleado)
    }

    pub async fn eliminar(&self, id: i64, actor: &Claims) -> Result<Empleado, AppError> {
        let empleado = self
            .empleado_repo
            .marcar_inactivo(id)
            .await?
            .ok_or(AppError::NoEncontrado("El empleado"))?;

        self.auditoria
            .registrar(
                actor.sub,
                AccionAuditoria::Eliminar,
                "empleados",
                Some(empleado.id),
                &format!("Baja de empleado '{}'", empleado.nombre),
            )
            .await?;

        Ok(empleado)
    }
}
