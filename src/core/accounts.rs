//! Account factory - builds valid user records.
//!
//! Standard accounts need both a phone number and an email; superusers need a
//! phone number and a password, and always get full privileges. Passwords are
//! hashed with argon2id before anything is written, and plaintext never leaves
//! the [`SecretString`] it arrived in.

use crate::{
    config::HashingConfig,
    entities::{User, user},
    errors::{Error, Result},
};
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version};
use password_hash::{PasswordHasher, SaltString, rand_core::OsRng};
use sea_orm::{Set, prelude::*};
use secrecy::{ExposeSecret, SecretString};
use tracing::{error, info};

/// Default one-time passcode for new accounts
pub const DEFAULT_OTP: &str = "0000";

/// Privilege flags that can be requested for a new account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Privileges {
    /// Administrative access
    pub is_admin: bool,
    /// Cash agent
    pub is_agent: bool,
    /// Staff access
    pub is_staff: bool,
    /// Every permission
    pub is_superuser: bool,
}

/// Input for [`create_user`] and [`create_superuser`].
#[derive(Debug, Default)]
pub struct NewUser {
    /// Given name
    pub first_name: Option<String>,
    /// Family name
    pub last_name: Option<String>,
    /// Login phone number
    pub phone_number: Option<String>,
    /// Email address, normalized before storage
    pub email: Option<String>,
    /// Plaintext password; `None` leaves the account without a usable password
    pub password: Option<SecretString>,
    /// Home address
    pub address: Option<String>,
    /// Requested privilege flags
    pub privileges: Privileges,
}

/// Lowercases the domain part of an email address and trims surrounding
/// whitespace. The local part is left untouched.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{local}@{}", domain.to_lowercase()),
        None => email.to_string(),
    }
}

fn required(value: Option<&str>, field: &'static str) -> Result<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
        .ok_or(Error::MissingField { field })
}

fn build_argon2(hashing: &HashingConfig) -> Result<Argon2<'static>> {
    let params = Params::new(
        hashing.memory_kib,
        hashing.iterations,
        hashing.parallelism,
        None,
    )
    .map_err(|e| {
        error!("Argon2 params error: {}", e);
        Error::PasswordHash {
            message: e.to_string(),
        }
    })?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hashes a password into an argon2id PHC string.
pub fn hash_password(hashing: &HashingConfig, password: &SecretString) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = build_argon2(hashing)?
        .hash_password(password.expose_secret().as_bytes(), &salt)
        .map_err(|e| {
            error!("Argon2 hashing error: {}", e);
            Error::PasswordHash {
                message: e.to_string(),
            }
        })?;
    Ok(hash.to_string())
}

/// Checks `candidate` against the user's stored hash.
///
/// Accounts without a usable password never match.
pub fn verify_password(user: &user::Model, candidate: &str) -> Result<bool> {
    let Some(stored) = user.password_hash.as_deref() else {
        return Ok(false);
    };
    let parsed = PasswordHash::new(stored).map_err(|e| Error::PasswordHash {
        message: e.to_string(),
    })?;
    Ok(Argon2::default()
        .verify_password(candidate.as_bytes(), &parsed)
        .is_ok())
}

/// Creates a standard account.
///
/// # Errors
/// * [`Error::MissingField`] when the email or phone number is absent or blank
/// * [`Error::UserAlreadyExists`] when either is already registered
pub async fn create_user(
    db: &DatabaseConnection,
    hashing: &HashingConfig,
    new_user: NewUser,
) -> Result<user::Model> {
    let email = normalize_email(&required(new_user.email.as_deref(), "email")?);
    let phone_number = required(new_user.phone_number.as_deref(), "phone_number")?;

    let password_hash = new_user
        .password
        .as_ref()
        .map(|password| hash_password(hashing, password))
        .transpose()?;

    let user = insert_user(
        db,
        &new_user,
        phone_number,
        Some(email),
        password_hash,
        new_user.privileges,
    )
    .await?;
    info!(user_id = user.id, "User created");
    Ok(user)
}

/// Creates a superuser. `is_superuser`, `is_staff` and `is_admin` are forced on
/// whatever the caller asked for; the email is optional.
///
/// # Errors
/// * [`Error::MissingPassword`] when no password is supplied
/// * [`Error::MissingField`] when the phone number is absent or blank
/// * [`Error::UserAlreadyExists`] when the phone number or email is taken
pub async fn create_superuser(
    db: &DatabaseConnection,
    hashing: &HashingConfig,
    new_user: NewUser,
) -> Result<user::Model> {
    let Some(password) = new_user.password.as_ref() else {
        return Err(Error::MissingPassword);
    };
    let phone_number = required(new_user.phone_number.as_deref(), "phone_number")?;
    let email = new_user
        .email
        .as_deref()
        .map(normalize_email)
        .filter(|e| !e.is_empty());

    let password_hash = hash_password(hashing, password)?;
    let privileges = Privileges {
        is_admin: true,
        is_staff: true,
        is_superuser: true,
        ..new_user.privileges
    };

    let user = insert_user(
        db,
        &new_user,
        phone_number,
        email,
        Some(password_hash),
        privileges,
    )
    .await?;
    info!(user_id = user.id, "Superuser created");
    Ok(user)
}

async fn insert_user(
    db: &DatabaseConnection,
    new_user: &NewUser,
    phone_number: String,
    email: Option<String>,
    password_hash: Option<String>,
    privileges: Privileges,
) -> Result<user::Model> {
    if get_user_by_phone(db, &phone_number).await?.is_some() {
        return Err(Error::UserAlreadyExists {
            field: "phone_number",
        });
    }
    if let Some(email) = &email {
        let taken = User::find()
            .filter(user::Column::Email.eq(email.as_str()))
            .one(db)
            .await?
            .is_some();
        if taken {
            return Err(Error::UserAlreadyExists { field: "email" });
        }
    }

    let now = chrono::Utc::now();
    let user = user::ActiveModel {
        first_name: Set(new_user.first_name.clone()),
        last_name: Set(new_user.last_name.clone()),
        email: Set(email),
        phone_number: Set(phone_number),
        password_hash: Set(password_hash),
        wallet: Set(0),
        otp: Set(DEFAULT_OTP.to_string()),
        location_lat: Set(Some(0.0)),
        location_long: Set(Some(0.0)),
        address: Set(new_user.address.clone()),
        credit_score: Set(0),
        verify_id: Set(None),
        verify_id_name: Set(None),
        nin: Set(None),
        bvn: Set(None),
        date_joined: Set(now),
        modified_date: Set(now),
        is_admin: Set(privileges.is_admin),
        is_agent: Set(privileges.is_agent),
        is_staff: Set(privileges.is_staff),
        is_active: Set(true),
        is_superuser: Set(privileges.is_superuser),
        ..Default::default()
    };

    user.insert(db).await.map_err(Into::into)
}

/// Finds a user by id.
pub async fn get_user_by_id(db: &DatabaseConnection, user_id: i64) -> Result<Option<user::Model>> {
    User::find_by_id(user_id).one(db).await.map_err(Into::into)
}

/// Finds a user by login phone number.
pub async fn get_user_by_phone(
    db: &DatabaseConnection,
    phone_number: &str,
) -> Result<Option<user::Model>> {
    User::find()
        .filter(user::Column::PhoneNumber.eq(phone_number.trim()))
        .one(db)
        .await
        .map_err(Into::into)
}
