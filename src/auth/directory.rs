use tokio::sync::RwLock;
use uuid::Uuid;

use super::errors::{AuthError, AuthResult};
use super::password::{hash_password, verify_password};
use crate::domain::user::value_objects::{validate_name, validate_password};
use crate::domain::user::{Credentials, Registration, Role, User};

/// Message returned for both unknown emails and wrong passwords
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";
/// Message returned when registering an email that is already taken
pub const EMAIL_TAKEN: &str = "Email already exists";

/// Password shared by the seeded demo accounts
pub const DEMO_PASSWORD: &str = "password123";

struct UserRecord {
    user: User,
    password_hash: String,
}

/// In-memory account list
///
/// Registrations mutate this list only; nothing here is written to the
/// durable store, so accounts last as long as the directory instance.
pub struct UserDirectory {
    users: RwLock<Vec<UserRecord>>,
    bcrypt_cost: u32,
}

impl UserDirectory {
    /// Creates an empty directory
    pub fn new(bcrypt_cost: u32) -> Self {
        Self {
            users: RwLock::new(Vec::new()),
            bcrypt_cost,
        }
    }

    /// Creates a directory seeded with the two demo accounts
    ///
    /// | id | name         | email             |
    /// |----|--------------|-------------------|
    /// | 1  | Jean Dupont  | jean@example.com  |
    /// | 2  | Marie Martin | marie@example.com |
    ///
    /// Both use [`DEMO_PASSWORD`].
    pub fn with_demo_users(bcrypt_cost: u32) -> AuthResult<Self> {
        let seed = [
            ("1", "Jean Dupont", "jean@example.com"),
            ("2", "Marie Martin", "marie@example.com"),
        ];
        let mut users = Vec::with_capacity(seed.len());
        for (id, name, email) in seed {
            users.push(UserRecord {
                user: User {
                    id: id.to_string(),
                    name: name.to_string(),
                    email: email.to_string(),
                    role: Role::User,
                },
                password_hash: hash_password(DEMO_PASSWORD, bcrypt_cost)?,
            });
        }
        Ok(Self {
            users: RwLock::new(users),
            bcrypt_cost,
        })
    }

    /// Checks credentials by exact email match
    ///
    /// Unknown email and wrong password fail identically.
    pub async fn authenticate(&self, credentials: &Credentials) -> AuthResult<User> {
        let users = self.users.read().await;
        let record = users
            .iter()
            .find(|r| r.user.email == credentials.email)
            .ok_or_else(|| AuthError::unauthorized(INVALID_CREDENTIALS))?;

        if !verify_password(&credentials.password, &record.password_hash)? {
            return Err(AuthError::unauthorized(INVALID_CREDENTIALS));
        }
        Ok(record.user.clone())
    }

    /// Adds an account with role `user`
    ///
    /// # Checks, in order
    /// 1. Email not already registered (conflict)
    /// 2. Name is 2 to 100 characters (validation, `name`)
    /// 3. Password is at least 6 characters (validation, `password`)
    ///
    /// The password is hashed without holding the lock; the email is checked
    /// again once the lock is taken to insert.
    pub async fn register(&self, registration: &Registration) -> AuthResult<User> {
        if self.contains_email(&registration.email).await {
            return Err(AuthError::conflict(EMAIL_TAKEN));
        }
        validate_name(&registration.name)?;
        validate_password(&registration.password)?;

        let password_hash = hash_password(&registration.password, self.bcrypt_cost)?;

        let mut users = self.users.write().await;
        if users.iter().any(|r| r.user.email == registration.email) {
            return Err(AuthError::conflict(EMAIL_TAKEN));
        }
        let user = User {
            id: Uuid::new_v4().to_string(),
            name: registration.name.clone(),
            email: registration.email.clone(),
            role: Role::User,
        };
        users.push(UserRecord {
            user: user.clone(),
            password_hash,
        });

        Ok(user)
    }

    async fn contains_email(&self, email: &str) -> bool {
        let users = self.users.read().await;
        users.iter().any(|r| r.user.email == email)
    }

    /// Looks up an account by id
    pub async fn find_by_id(&self, id: &str) -> Option<User> {
        let users = self.users.read().await;
        users.iter().find(|r| r.user.id == id).map(|r| r.user.clone())
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::errors::ErrorKind;

    const COST: u32 = 4;

    fn credentials(email: &str, password: &str) -> Credentials {
        Credentials {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    fn registration(name: &str, email: &str, password: &str) -> Registration {
        Registration {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            phone: None,
        }
    }

    #[tokio::test]
    async fn demo_user_authenticates() {
        let directory = UserDirectory::with_demo_users(COST).unwrap();
        let user = directory
            .authenticate(&credentials("jean@example.com", DEMO_PASSWORD))
            .await
            .unwrap();
        assert_eq!(user.id, "1");
        assert_eq!(user.name, "Jean Dupont");
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_fail_alike() {
        let directory = UserDirectory::with_demo_users(COST).unwrap();
        let wrong = directory
            .authenticate(&credentials("jean@example.com", "nope"))
            .await
            .unwrap_err();
        let unknown = directory
            .authenticate(&credentials("ghost@example.com", DEMO_PASSWORD))
            .await
            .unwrap_err();
        assert_eq!(wrong.kind(), ErrorKind::Unauthorized);
        assert_eq!(wrong.to_string(), unknown.to_string());
    }

    #[tokio::test]
    async fn email_match_is_exact() {
        let directory = UserDirectory::with_demo_users(COST).unwrap();
        let err = directory
            .authenticate(&credentials("JEAN@example.com", DEMO_PASSWORD))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
    }

    #[tokio::test]
    async fn register_then_authenticate() {
        let directory = UserDirectory::new(COST);
        let user = directory
            .register(&registration("Alice", "alice@example.com", "secret1"))
            .await
            .unwrap();
        assert_eq!(user.role, Role::User);
        assert_eq!(directory.find_by_id(&user.id).await, Some(user.clone()));

        let logged_in = directory
            .authenticate(&credentials("alice@example.com", "secret1"))
            .await
            .unwrap();
        assert_eq!(logged_in, user);
    }

    #[tokio::test]
    async fn duplicate_email_conflicts_and_keeps_original() {
        let directory = UserDirectory::with_demo_users(COST).unwrap();
        let err = directory
            .register(&registration("Impostor", "jean@example.com", "another1"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(directory.len().await, 2);

        let user = directory
            .authenticate(&credentials("jean@example.com", DEMO_PASSWORD))
            .await
            .unwrap();
        assert_eq!(user.name, "Jean Dupont");
    }

    #[tokio::test]
    async fn conflict_is_checked_before_field_rules() {
        let directory = UserDirectory::with_demo_users(COST).unwrap();
        let err = directory
            .register(&registration("J", "jean@example.com", "1"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrent_registrations_of_one_email_admit_one() {
        let directory = std::sync::Arc::new(UserDirectory::new(COST));
        let tasks: Vec<_> = (0..4)
            .map(|i| {
                let directory = std::sync::Arc::clone(&directory);
                tokio::spawn(async move {
                    directory
                        .register(&registration(
                            &format!("Racer {}", i),
                            "race@example.com",
                            "secret1",
                        ))
                        .await
                })
            })
            .collect();

        let mut created = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(_) => created += 1,
                Err(e) => assert_eq!(e.kind(), ErrorKind::Conflict),
            }
        }
        assert_eq!(created, 1);
        assert_eq!(directory.len().await, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn authenticate_runs_while_a_registration_hashes() {
        let directory = std::sync::Arc::new(UserDirectory::with_demo_users(COST).unwrap());
        let registering = {
            let directory = std::sync::Arc::clone(&directory);
            tokio::spawn(async move {
                directory
                    .register(&registration("Paul Durand", "paul@example.com", "secret42"))
                    .await
            })
        };

        let user = directory
            .authenticate(&credentials("marie@example.com", DEMO_PASSWORD))
            .await
            .unwrap();
        assert_eq!(user.id, "2");
        registering.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn field_rules_report_details() {
        let directory = UserDirectory::new(COST);
        let err = directory
            .register(&registration("A", "a@example.com", "secret1"))
            .await
            .unwrap_err();
        assert!(err.details().unwrap().contains_key("name"));

        let err = directory
            .register(&registration("Alice", "a@example.com", "123"))
            .await
            .unwrap_err();
        assert!(err.details().unwrap().contains_key("password"));
        assert!(directory.is_empty().await);
    }
}
