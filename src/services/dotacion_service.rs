// src/services/dotacion_service.rs

use crate::{
    common::error::AppError,
    db::DotacionRepository,
    models::{
        auditoria::AccionAuditoria,
        dotacion::{ActualizarDotacionPayload, CrearDotacionPayload, Dotacion},
        usuario::Claims,
    },
    services::auditoria_service::AuditoriaService,
};

const ESTADO_POR_DEFECTO: &str = "disponible";

#[derive(Clone)]
pub struct DotacionService {
    dotacion_repo: DotacionRepository,
    auditoria: AuditoriaService,
}

impl DotacionService {
    pub fn new(dotacion_repo: DotacionRepository, auditoria: AuditoriaService) -> Self {
        Self { dotacion_repo, auditoria }
    }

    pub async fn listar(&self) -> Result<Vec<Dotacion>, AppError> {
        self.dotacion_repo.listar().await
    }

    pub async fn obtener(&self, id: i64) -> Result<Dotacion, AppError> {
        self.dotacion_repo
            .obtener(id)
            .await?
            .ok_or(AppError::NoEncontrado("La dotación"))
    }

    pub async fn crear(
        &self,
        payload: CrearDotacionPayload,
        actor: &Claims,
    ) -> Result<Dotacion, AppError> {
        let estado = payload.estado.as_deref().unwrap_or(ESTADO_POR_DEFECTO);
        let dotacion = self
            .dotacion_repo
            .crear(
                &payload.elemento,
                payload.talla.as_deref(),
                payload.cantidad,
                estado,
                payload.empleado_id,
                payload.observaciones.as_deref(),
            )
            .await?;

        self.auditoria
            .registrar(
                actor.sub,
                AccionAuditoria::Crear,
                "dotaciones",
                Some(dotacion.id),
                &format!("Alta de dotación '{}'", dotacion.elemento),
            )
            .await?;

        Ok(dotacion)
    }

    // PUT: reemplazo completo de la fila.
    pub async fn actualizar(
        &self,
        id: i64,
        payload: CrearDotacionPayload,
        actor: &Claims,
    ) -> Result<Dotacion, AppError> {
        let estado = payload.estado.as_deref().unwrap_or(ESTADO_POR_DEFECTO);
        let dotacion = self
            .dotacion_repo
            .actualizar(
                id,
                &payload.elemento,
                payload.talla.as_deref(),
                payload.cantidad,
                estado,
                payload.empleado_id,
                payload.observaciones.as_deref(),
            )
            .await?
            .ok_or(AppError::NoEncontrado("La dotación"))?;

        self.auditoria
            .registrar(
                actor.sub,
                AccionAuditoria::Actualizar,
                "dotaciones",
                Some(dotacion.id),
                &format!("Actualización de dotación '{}'", dotacion.elemento),
            )
            .await?;

        Ok(dotacion)
    }

    // PATCH: solo los campos presentes.
    pub async fn actualizar_parcial(
        &self,
        id: i64,
        payload: ActualizarDotacionPayload,
        actor: &Claims,
    ) -> Result<Dotacion, AppError> {
        if payload.vacio() {
            return Err(AppError::SinCampos);
        }

        let dotacion = self
            .dotacion_repo
            .actualizar_parcial(id, &payload)
            .await?
            .ok_or(AppError::NoEncontrado("La dotación"))?;

        self.auditoria
            .registrar(
                actor.sub,
                AccionAuditoria::Actualizar,
                "dotaciones",
                Some(dotacion.id),
                &format!("Actualización parcial de dotación '{}'", dotacion.elemento),
            )
            .await?;

        Ok(dotacion)
    }

    pub async fn eliminar(&self, id: i64, actor: &Claims) -> Result<Dotacion, AppError> {
        let dotacion = self
            .dotacion_repo
            .marcar_inactiva(id)
            .await?
            .ok_or(AppError::NoEncontrado("La dotación"))?;

        self.auditoria
            .registrar(
                actor.sub,
                AccionAuditoria::Eliminar,
                "dotaciones",
                Some(dotacion.id),
                &format!("Baja de dotación '{}'", dotacion.elemento),
            )
            .await?;

        Ok(dotacion)
    }
}
