use std::sync::Arc;

use super::security_config::SecurityConfig;
use crate::auth::credentials::CredentialStore;
use crate::resources::StudentStore;
use crate::services::login::LoginService;

/// Application state containing shared, read-only resources.
///
/// Built once at startup and handed to actix as `web::Data<AppState>`.
#[derive(Clone)]
pub struct AppState {
    /// Signing configuration shared by login and the auth gate
    pub security: SecurityConfig,
    /// Identity → secret/role records
    pub credentials: Arc<dyn CredentialStore>,
    /// Protected dataset served by `/users`
    pub students: Arc<StudentStore>,
}

impl AppState {
    pub fn new(
        security: SecurityConfig,
        credentials: Arc<dyn CredentialStore>,
        students: StudentStore,
    ) -> Self {
        Self {
            security,
            credentials,
            students: Arc::new(students),
        }
    }

    pub fn login_service(&self) -> LoginService {
        LoginService::new(self.credentials.clone(), self.security.clone())
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("security", &self.security)
            .field("students", &self.students.len())
            .finish_non_exhaustive()
    }
}
