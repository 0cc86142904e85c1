use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;

use crate::domain::access::models::Role;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::AccessToken;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::Password;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token issuance
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    async fn ensure_unique(&self, command: &RegisterUserCommand) -> Result<(), UserError> {
        if self
            .repository
            .find_by_email(&command.email)
            .await?
            .is_some()
        {
            return Err(UserError::EmailAlreadyExists(command.email.to_string()));
        }

        if self
            .repository
            .find_by_username(&command.username)
            .await?
            .is_some()
        {
            return Err(UserError::UsernameAlreadyExists(
                command.username.to_string(),
            ));
        }

        Ok(())
    }

    async fn hash_password(&self, password: Password) -> Result<String, UserError> {
        // Hashing is CPU bound; run it on the blocking pool.
        let authenticator = Arc::clone(&self.authenticator);
        tokio::task::spawn_blocking(move || authenticator.hash_password(password.expose()))
            .await
            .map_err(|e| UserError::Unknown(e.to_string()))?
            .map_err(|e| UserError::Hashing(e.to_string()))
    }

    async fn insert(&self, command: RegisterUserCommand, role: Role) -> Result<User, UserError> {
        let password_hash = self.hash_password(command.password).await?;

        self.repository
            .create(NewUser {
                username: command.username,
                email: command.email,
                password_hash,
                role,
            })
            .await
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register_user(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        self.ensure_unique(&command).await?;

        let user = self.insert(command, Role::User).await?;
        tracing::info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(user)
    }

    async fn login(&self, email: String, password: String) -> Result<AccessToken, UserError> {
        let email = EmailAddress::new(email).map_err(|_| UserError::InvalidCredentials)?;

        let user = match self.repository.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                tracing::debug!("Login attempt for unknown email");
                return Err(UserError::InvalidCredentials);
            }
        };

        let user_id = user.id;
        let authenticator = Arc::clone(&self.authenticator);
        let result = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(
                &password,
                &user.password_hash,
                user.id.0,
                user.role.as_str(),
            )
        })
        .await
        .map_err(|e| UserError::Unknown(e.to_string()))?;

        match result {
            Ok(authenticated) => {
                tracing::info!(user_id = %user_id, "User logged in");
                Ok(AccessToken {
                    token: authenticated.access_token,
                    expires_at: authenticated.expires_at,
                })
            }
            Err(AuthenticationError::InvalidCredentials) => {
                tracing::debug!(user_id = %user_id, "Login attempt with wrong password");
                Err(UserError::InvalidCredentials)
            }
            Err(AuthenticationError::JwtError(e)) => Err(UserError::Token(e.to_string())),
        }
    }

    async fn get_user(&self, id: UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    async fn provision_admin(&self, command: RegisterUserCommand) -> Result<bool, UserError> {
        if let Some(existing) = self.repository.find_by_email(&command.email).await? {
            tracing::info!(
                user_id = %existing.id,
                role = %existing.role,
                "Administrator account already exists"
            );
            return Ok(false);
        }

        if self
            .repository
            .find_by_username(&command.username)
            .await?
            .is_some()
        {
            return Err(UserError::UsernameAlreadyExists(
                command.username.to_string(),
            ));
        }

        let admin = self.insert(command, Role::Admin).await?;
        tracing::info!(user_id = %admin.id, email = %admin.email, "Administrator account created");

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use auth::JwtHandler;
    use chrono::Duration;
    use chrono::Utc;
    use mockall::mock;

    use super::*;
    use crate::domain::user::models::Username;

    const SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: NewUser) -> Result<User, UserError>;
            async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserError>;
            async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;
            async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;
        }
    }

    fn authenticator() -> Arc<Authenticator> {
        Arc::new(Authenticator::new(
            JwtHandler::new(SECRET),
            Duration::minutes(30),
        ))
    }

    fn stored(new_user: NewUser, id: i64) -> User {
        User {
            id: UserId(id),
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            role: new_user.role,
            created_at: Utc::now(),
        }
    }

    fn existing_user(id: i64, password: &str, role: Role) -> User {
        stored(
            NewUser {
                username: Username::new(format!("user{}", id)).unwrap(),
                email: EmailAddress::new(format!("user{}@example.com", id)).unwrap(),
                password_hash: auth::PasswordHasher::new().hash(password).unwrap(),
                role,
            },
            id,
        )
    }

    fn register_command(username: &str, email: &str) -> RegisterUserCommand {
        RegisterUserCommand::new(
            Username::new(username.to_string()).unwrap(),
            EmailAddress::new(email.to_string()).unwrap(),
            Password::new("password123".to_string()).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_register_user_success() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_create()
            .withf(|user| {
                user.username.as_str() == "testuser"
                    && user.email.as_str() == "test@example.com"
                    && user.role == Role::User
                    && user.password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(|user| Ok(stored(user, 1)));

        let service = UserService::new(Arc::new(repository), authenticator());

        let user = service
            .register_user(register_command("testuser", "test@example.com"))
            .await
            .unwrap();

        assert_eq!(user.id, UserId(1));
        assert_eq!(user.role, Role::User);
        assert_ne!(user.password_hash, "password123");
    }

    #[tokio::test]
    async fn test_register_user_duplicate_email() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(existing_user(3, "whatever", Role::User))));
        repository.expect_find_by_username().times(0);
        repository.expect_create().times(0);

        let service = UserService::new(Arc::new(repository), authenticator());

        let result = service
            .register_user(register_command("someone", "a@x.com"))
            .await;
        assert!(matches!(result, Err(UserError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_register_user_duplicate_username() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(Some(existing_user(3, "whatever", Role::User))));
        repository.expect_create().times(0);

        let service = UserService::new(Arc::new(repository), authenticator());

        let result = service
            .register_user(register_command("user3", "fresh@example.com"))
            .await;
        assert!(matches!(result, Err(UserError::UsernameAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_login_success_issues_token_for_user() {
        let mut repository = MockTestUserRepository::new();

        let user = existing_user(9, "correct-horse", Role::Admin);
        repository
            .expect_find_by_email()
            .withf(|email| email.as_str() == "user9@example.com")
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let authenticator = authenticator();
        let service = UserService::new(Arc::new(repository), Arc::clone(&authenticator));

        let token = service
            .login("user9@example.com".to_string(), "correct-horse".to_string())
            .await
            .unwrap();

        let claims = authenticator.validate_token(&token.token).unwrap();
        assert_eq!(claims.user_id, 9);
        assert_eq!(claims.role, "admin");
        assert_eq!(claims.exp, token.expires_at);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut repository = MockTestUserRepository::new();

        let user = existing_user(9, "correct-horse", Role::User);
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = UserService::new(Arc::new(repository), authenticator());

        let result = service
            .login("user9@example.com".to_string(), "battery-staple".to_string())
            .await;
        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_or_malformed_email() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository), authenticator());

        let unknown = service
            .login("ghost@example.com".to_string(), "password123".to_string())
            .await;
        assert!(matches!(unknown, Err(UserError::InvalidCredentials)));

        // Never reaches storage.
        let malformed = service
            .login("not-an-email".to_string(), "password123".to_string())
            .await;
        assert!(matches!(malformed, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository), authenticator());

        let result = service.get_user(UserId(404)).await;
        assert!(matches!(result, Err(UserError::NotFound(UserId(404)))));
    }

    #[tokio::test]
    async fn test_provision_admin_creates_admin() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_create()
            .withf(|user| user.role == Role::Admin)
            .times(1)
            .returning(|user| Ok(stored(user, 1)));

        let service = UserService::new(Arc::new(repository), authenticator());

        let created = service
            .provision_admin(register_command("admin", "admin@example.com"))
            .await
            .unwrap();
        assert!(created);
    }

    #[tokio::test]
    async fn test_provision_admin_is_idempotent() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(existing_user(1, "whatever", Role::Admin))));
        repository.expect_create().times(0);

        let service = UserService::new(Arc::new(repository), authenticator());

        let created = service
            .provision_admin(register_command("admin", "user1@example.com"))
            .await
            .unwrap();
        assert!(!created);
    }
}
