// src/services/auth.rs

use bcrypt::{hash, verify};
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{AuthRepository, UsuarioRepository},
    models::{
        auditoria::AccionAuditoria,
        usuario::{Claims, EstadoUsuario, RegistroPayload, RolUsuario, Usuario},
    },
    services::{auditoria_service::AuditoriaService, tokens::TokenService},
};

// Clave del advisory lock que serializa los registros concurrentes durante
// el bootstrap del primer superadmin.
const BLOQUEO_BOOTSTRAP: i64 = 7_301;

#[derive(Clone)]
pub struct AuthService {
    usuario_repo: UsuarioRepository,
    auth_repo: AuthRepository,
    tokens: TokenService,
    auditoria: AuditoriaService,
    pool: PgPool,
}

impl AuthService {
    pub fn new(
        usuario_repo: UsuarioRepository,
        auth_repo: AuthRepository,
        tokens: TokenService,
        auditoria: AuditoriaService,
        pool: PgPool,
    ) -> Self {
        Self { usuario_repo, auth_repo, tokens, auditoria, pool }
    }

    // El historial de logins es best-effort: un fallo se loguea y no toca
    // la respuesta del intento.
    async fn anotar_intento(
        &self,
        usuario_id: Option<i64>,
        username: &str,
        exitoso: bool,
        motivo: Option<&str>,
        ip: Option<&str>,
    ) {
        if let Err(e) = self
            .auth_repo
            .registrar_intento_login(usuario_id, username, exitoso, motivo, ip)
            .await
        {
            tracing::warn!("No se pudo anotar el intento de login de '{username}': {e}");
        }
    }

    // La respuesta es idéntica para usuario desconocido y contraseña
    // equivocada: el motivo real solo queda en el historial interno.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        ip: Option<String>,
    ) -> Result<(String, Usuario), AppError> {
        let ip = ip.as_deref();

        let usuario = match self.usuario_repo.buscar_por_username(username).await? {
            Some(usuario) => usuario,
            None => {
                self.anotar_intento(None, username, false, Some("usuario desconocido"), ip)
                    .await;
                return Err(AppError::CredencialesInvalidas);
            }
        };

        let password_entrante = password.to_owned();
        let hash_guardado = usuario.password_hash.clone();

        // La verificación corre en un hilo aparte para no bloquear el runtime.
        let password_valida = tokio::task::spawn_blocking(move || {
            verify(&password_entrante, &hash_guardado)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Fallo en la tarea de verificación de contraseña: {e}"))??;

        if !password_valida {
            self.anotar_intento(
                Some(usuario.id),
                username,
                false,
                Some("contraseña incorrecta"),
                ip,
            )
            .await;
            return Err(AppError::CredencialesInvalidas);
        }

        if usuario.estado != EstadoUsuario::Activo {
            self.anotar_intento(Some(usuario.id), username, false, Some("cuenta inactiva"), ip)
                .await;
            return Err(AppError::CuentaInactiva);
        }

        let token = self.tokens.emitir(&usuario)?;
        self.anotar_intento(Some(usuario.id), username, true, None, ip).await;

        self.auditoria
            .registrar(
                usuario.id,
                AccionAuditoria::Login,
                "usuarios",
                Some(usuario.id),
                &format!("Inicio de sesión de '{}'", usuario.username),
            )
            .await?;

        Ok((token, usuario))
    }

    // Alta de cuenta. Mientras no exista un superadmin activo el endpoint se
    // auto-elige: la primera cuenta es superadmin sin importar el rol pedido
    // y sin exigir token. Después, solo un superadmin puede crear cuentas y
    // esta vía no acuña más superadmins.
    pub async fn registrar(
        &self,
        payload: RegistroPayload,
        actor: Option<&Claims>,
    ) -> Result<Usuario, AppError> {
        let password = payload.password.clone();
        let password_hash = tokio::task::spawn_blocking(move || {
            hash(&password, bcrypt::DEFAULT_COST)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Fallo en la tarea de hashing: {e}"))??;

        let mut tx = self.pool.begin().await?;

        // Serializa dos bootstraps concurrentes: solo uno ve la tabla vacía.
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(BLOQUEO_BOOTSTRAP)
            .execute(&mut *tx)
            .await?;

        let hay_superadmin = self.usuario_repo.existe_superadmin_activo(&mut *tx).await?;

        let rol_final = if hay_superadmin {
            let actor = actor.ok_or(AppError::TokenAusente)?;
            if actor.rol != RolUsuario::Superadmin {
                return Err(AppError::RolInsuficiente);
            }
            if payload.rol == RolUsuario::Superadmin {
                return Err(AppError::SuperadminExiste);
            }
            payload.rol
        } else {
            RolUsuario::Superadmin
        };

        let usuario = self
            .usuario_repo
            .crear(
                &mut *tx,
                &payload.username,
                &payload.nombre,
                &password_hash,
                rol_final,
            )
            .await?;

        tx.commit().await?;

        // En el bootstrap el actor es la propia cuenta recién creada.
        let actor_id = actor.map(|c| c.sub).unwrap_or(usuario.id);
        self.auditoria
            .registrar(
                actor_id,
                AccionAuditoria::Crear,
                "usuarios",
                Some(usuario.id),
                &format!(
                    "Alta de usuario '{}' con rol {}",
                    usuario.username,
                    usuario.rol.etiqueta()
                ),
            )
            .await?;

        Ok(usuario)
    }

    pub async fn logout(&self, token: &str, claims: &Claims) -> Result<(), AppError> {
        let expira_en = TokenService::expiracion(claims)?;
        self.auth_repo.invalidar_token(token, expira_en).await?;

        self.auditoria
            .registrar(
                claims.sub,
                AccionAuditoria::Logout,
                "usuarios",
                Some(claims.sub),
                &format!("Cierre de sesión de '{}'", claims.username),
            )
            .await?;

        Ok(())
    }

    // Verificación completa: firma y expiración primero, lista de
    // invalidación después.
    pub async fn validar_token(&self, token: &str) -> Result<Claims, AppError> {
        let claims = self.tokens.decodificar(token)?;
        if self.auth_repo.token_invalidado(token).await? {
            return Err(AppError::TokenInvalidado);
        }
        Ok(claims)
    }

    // Bitácora de accesos, desacoplada de la respuesta: el fallo se loguea
    // y nada más.
    pub fn anotar_acceso_en_segundo_plano(&self, usuario_id: i64, ruta: String, metodo: String) {
        let auth_repo = self.auth_repo.clone();
        tokio::spawn(async move {
            if let Err(e) = auth_repo.registrar_acceso(usuario_id, &ruta, &metodo).await {
                tracing::warn!("No se pudo anotar el acceso {metodo} {ruta}: {e}");
            }
        });
    }
}
