// src/db/usuario_repo.rs

use sqlx::{Executor, PgPool, Postgres, QueryBuilder};

use crate::{
    common::error::AppError,
    models::usuario::{EstadoUsuario, RolUsuario, Usuario},
};

// Campos ya normalizados para la actualización parcial: la contraseña llega
// aquí hasheada y el rol trae consigo su id fijo.
#[derive(Debug, Default, Clone)]
pub struct CamposUsuario {
    pub username: Option<String>,
    pub nombre: Option<String>,
    pub password_hash: Option<String>,
    pub rol: Option<RolUsuario>,
}

impl CamposUsuario {
    pub fn vacio(&self) -> bool {
        self.username.is_none()
            && self.nombre.is_none()
            && self.password_hash.is_none()
            && self.rol.is_none()
    }
}

// Construye el UPDATE emitiendo solo las asignaciones presentes.
fn construir_actualizacion(id: i64, campos: &CamposUsuario) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("UPDATE usuarios SET ");
    let mut sep = qb.separated(", ");
    if let Some(username) = &campos.username {
        sep.push("username = ").push_bind_unseparated(username.clone());
    }
    if let Some(nombre) = &campos.nombre {
        sep.push("nombre = ").push_bind_unseparated(nombre.clone());
    }
    if let Some(hash) = &campos.password_hash {
        sep.push("password_hash = ").push_bind_unseparated(hash.clone());
    }
    if let Some(rol) = campos.rol {
        sep.push("rol = ").push_bind_unseparated(rol);
        sep.push("id_rol = ").push_bind_unseparated(rol.id());
    }
    // Siempre se estampa la fecha de actualización.
    sep.push("actualizado_en = now()");
    qb.push(" WHERE id = ").push_bind(id);
    qb.push(" RETURNING *");
    qb
}

#[derive(Clone)]
pub struct UsuarioRepository {
    pool: PgPool,
}

impl UsuarioRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn buscar_por_username(&self, username: &str) -> Result<Option<Usuario>, AppError> {
        let usuario = sqlx::query_as::<_, Usuario>("SELECT * FROM usuarios WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(usuario)
    }

    pub async fn buscar_por_id(&self, id: i64) -> Result<Option<Usuario>, AppError> {
        let usuario = sqlx::query_as::<_, Usuario>("SELECT * FROM usuarios WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(usuario)
    }

    pub async fn listar(&self) -> Result<Vec<Usuario>, AppError> {
        let usuarios = sqlx::query_as::<_, Usuario>("SELECT * FROM usuarios ORDER BY username ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(usuarios)
    }

    pub async fn existe_superadmin_activo<'e, E>(&self, executor: E) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let existe: (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM usuarios WHERE rol = 'superadmin' AND estado = 'activo')",
        )
        .fetch_one(executor)
        .await?;
        Ok(existe.0)
    }

    pub async fn crear<'e, E>(
        &self,
        executor: E,
        username: &str,
        nombre: &str,
        password_hash: &str,
        rol: RolUsuario,
    ) -> Result<Usuario, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Usuario>(
            r#"
            INSERT INTO usuarios (username, nombre, password_hash, rol, id_rol)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(username)
        .bind(nombre)
        .bind(password_hash)
        .bind(rol)
        .bind(rol.id())
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::UsernameExiste;
                }
            }
            e.into()
        })
    }

    pub async fn actualizar_parcial(
        &self,
        id: i64,
        campos: &CamposUsuario,
    ) -> Result<Option<Usuario>, AppError> {
        let mut qb = construir_actualizacion(id, campos);
        let usuario = qb
            .build_query_as::<Usuario>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_unique_violation() {
                        return AppError::UsernameExiste;
                    }
                }
                e.into()
            })?;
        Ok(usuario)
    }

    pub async fn cambiar_estado(
        &self,
        id: i64,
        estado: EstadoUsuario,
    ) -> Result<Option<Usuario>, AppError> {
        let usuario = sqlx::query_as::<_, Usuario>(
            "UPDATE usuarios SET estado = $2, actualizado_en = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(estado)
        .fetch_optional(&self.pool)
        .await?;
        Ok(usuario)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actualizacion_emite_solo_los_campos_presentes() {
        let campos = CamposUsuario {
            nombre: Some("Nuevo Nombre".into()),
            ..Default::default()
        };
        let mut qb = construir_actualizacion(7, &campos);
        let sql = qb.sql();
        assert!(sql.contains("nombre = $1"));
        assert!(sql.contains("actualizado_en = now()"));
        assert!(!sql.contains("username ="));
        assert!(!sql.contains("password_hash ="));
        assert!(!sql.contains("rol ="));
    }

    #[test]
    fn actualizacion_de_rol_tambien_fija_id_rol() {
        let campos = CamposUsuario {
            rol: Some(RolUsuario::Admin),
            ..Default::default()
        };
        let mut qb = construir_actualizacion(3, &campos);
        let sql = qb.sql();
        assert!(sql.contains("rol = $1"));
        assert!(sql.contains("id_rol = $2"));
    }

    #[test]
    fn actualizacion_completa_separa_con_comas() {
        let campos = CamposUsuario {
            username: Some("nuevo".into()),
            nombre: Some("Nuevo".into()),
            password_hash: Some("$2b$12$hash".into()),
            rol: Some(RolUsuario::Viewer),
        };
        let mut qb = construir_actualizacion(1, &campos);
        let sql = qb.sql();
        assert!(sql.contains("username = $1, nombre = $2, password_hash = $3"));
        assert!(sql.ends_with("RETURNING *"));
    }
}
