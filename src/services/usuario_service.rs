// src/services/usuario_service.rs

use bcrypt::hash;

use crate::{
    common::error::AppError,
    db::{usuario_repo::CamposUsuario, UsuarioRepository},
    models::{
        auditoria::AccionAuditoria,
        usuario::{ActualizarUsuarioPayload, Claims, EstadoUsuario, Usuario},
    },
    services::auditoria_service::AuditoriaService,
};

#[derive(Clone)]
pub struct UsuarioService {
    usuario_repo: UsuarioRepository,
    auditoria: AuditoriaService,
}

impl UsuarioService {
    pub fn new(usuario_repo: UsuarioRepository, auditoria: AuditoriaService) -> Self {
        Self { usuario_repo, auditoria }
    }

    pub async fn listar(&self) -> Result<Vec<Usuario>, AppError> {
        self.usuario_repo.listar().await
    }

    // Actualización parcial: solo los campos presentes se escriben. La
    // contraseña, si viene, se re-hashea antes de tocar la base.
    pub async fn actualizar(
        &self,
        id: i64,
        payload: ActualizarUsuarioPayload,
        actor: &Claims,
    ) -> Result<Usuario, AppError> {
        if payload.vacio() {
            return Err(AppError::SinCampos);
        }

        let password_hash = match payload.password {
            Some(password) => Some(
                tokio::task::spawn_blocking(move || hash(&password, bcrypt::DEFAULT_COST))
                    .await
                    .map_err(|e| anyhow::anyhow!("Fallo en la tarea de hashing: {e}"))??,
            ),
            None => None,
        };

        let campos = CamposUsuario {
            username: payload.username,
            nombre: payload.nombre,
            password_hash,
            rol: payload.rol,
        };

        let usuario = self
            .usuario_repo
            .actualizar_parcial(id, &campos)
            .await?
            .ok_or(AppError::NoEncontrado("El usuario"))?;

        self.auditoria
            .registrar(
                actor.sub,
                AccionAuditoria::Actualizar,
                "usuarios",
                Some(usuario.id),
                &format!("Actualización de usuario '{}'", usuario.username),
            )
            .await?;

        Ok(usuario)
    }

    // Un superadmin no puede desactivarse a sí mismo: siempre debe quedar
    // al menos una vía de administración.
    pub async fn cambiar_estado(
        &self,
        id: i64,
        estado: EstadoUsuario,
        actor: &Claims,
    ) -> Result<Usuario, AppError> {
        if id == actor.sub {
            return Err(AppError::AccionSobreSiMismo);
        }

        let usuario = self
            .usuario_repo
            .cambiar_estado(id, estado)
            .await?
            .ok_or(AppError::NoEncontrado("El usuario"))?;

        self.auditoria
            .registrar(
                actor.sub,
                AccionAuditoria::CambioEstado,
                "usuarios",
                Some(usuario.id),
                &format!(
                    "Cambio de estado de '{}' a {}",
                    usuario.username,
                    match usuario.estado {
                        EstadoUsuario::Activo => "activo",
                        EstadoUsuario::Inactivo => "inactivo",
                    }
                ),
            )
            .await?;

        Ok(usuario)
    }
}
