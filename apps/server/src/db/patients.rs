//! Patient repository
//!
//! Data access for the `patients` table. Every function takes a connection so
//! callers decide whether it runs on a pooled connection or inside a
//! transaction.

use crate::models::Patient;
use crate::{Error, Result};
use medrec_schema::NewPatient;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

const PATIENT_COLUMNS: &str =
    "id, first_name, last_name, date_of_birth, gender, phone, email, address, age";

/// Patient columns that must be unique across all patients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Phone,
    Email,
}

impl ContactField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactField::Phone => "phone",
            ContactField::Email => "email",
        }
    }
}

pub async fn find(conn: &mut SqliteConnection, id: i64) -> Result<Option<Patient>> {
    let row = sqlx::query(&format!(
        "SELECT {PATIENT_COLUMNS} FROM patients WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await
    .map_err(Error::Database)?;

    Ok(row.map(|row| patient_from_row(&row)))
}

pub async fn exists(conn: &mut SqliteConnection, id: i64) -> Result<bool> {
    let row = sqlx::query("SELECT 1 FROM patients WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(Error::Database)?;

    Ok(row.is_some())
}

/// All patients ordered by id.
pub async fn list(conn: &mut SqliteConnection) -> Result<Vec<Patient>> {
    let rows = sqlx::query(&format!(
        "SELECT {PATIENT_COLUMNS} FROM patients ORDER BY id"
    ))
    .fetch_all(&mut *conn)
    .await
    .map_err(Error::Database)?;

    Ok(rows.iter().map(patient_from_row).collect())
}

/// Id of the patient (other than `exclude_id`) already using `value` for `field`.
pub async fn find_contact_owner(
    conn: &mut SqliteConnection,
    field: ContactField,
    value: &str,
    exclude_id: Option<i64>,
) -> Result<Option<i64>> {
    // `field` comes from a closed enum, never from input.
    let row = sqlx::query(&format!(
        "SELECT id FROM patients WHERE {} = ? AND (? IS NULL OR id <> ?) LIMIT 1",
        field.as_str()
    ))
    .bind(value)
    .bind(exclude_id)
    .bind(exclude_id)
    .fetch_optional(&mut *conn)
    .await
    .map_err(Error::Database)?;

    Ok(row.map(|row| row.get("id")))
}

pub async fn insert(conn: &mut SqliteConnection, patient: &NewPatient) -> Result<Patient> {
    let row = sqlx::query(&format!(
        r#"
        INSERT INTO patients
            (first_name, last_name, date_of_birth, gender, phone, email, address, age)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING {PATIENT_COLUMNS}
        "#
    ))
    .bind(&patient.first_name)
    .bind(&patient.last_name)
    .bind(patient.date_of_birth)
    .bind(&patient.gender)
    .bind(&patient.phone)
    .bind(&patient.email)
    .bind(&patient.address)
    .bind(patient.age)
    .fetch_one(&mut *conn)
    .await
    .map_err(map_write_error)?;

    Ok(patient_from_row(&row))
}

/// Replace every field of patient `id`. Returns `None` when it does not exist.
pub async fn update(
    conn: &mut SqliteConnection,
    id: i64,
    patient: &NewPatient,
) -> Result<Option<Patient>> {
    let row = sqlx::query(&format!(
        r#"
        UPDATE patients
        SET first_name = ?,
            last_name = ?,
            date_of_birth = ?,
            gender = ?,
            phone = ?,
            email = ?,
            address = ?,
            age = ?
        WHERE id = ?
        RETURNING {PATIENT_COLUMNS}
        "#
    ))
    .bind(&patient.first_name)
    .bind(&patient.last_name)
    .bind(patient.date_of_birth)
    .bind(&patient.gender)
    .bind(&patient.phone)
    .bind(&patient.email)
    .bind(&patient.address)
    .bind(patient.age)
    .bind(id)
    .fetch_optional(&mut *conn)
    .await
    .map_err(map_write_error)?;

    Ok(row.map(|row| patient_from_row(&row)))
}

/// Returns `false` when no patient had this id.
pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM patients WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await
        .map_err(Error::Database)?;

    Ok(result.rows_affected() > 0)
}

fn patient_from_row(row: &SqliteRow) -> Patient {
    Patient {
        id: row.get("id"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        date_of_birth: row.get("date_of_birth"),
        gender: row.get("gender"),
        phone: row.get("phone"),
        email: row.get("email"),
        address: row.get("address"),
        age: row.get("age"),
    }
}

/// Unique-index violations become conflicts naming the contact field.
///
/// The service checks uniqueness before writing; this covers a concurrent
/// writer slipping in between the check and the write.
fn map_write_error(err: sqlx::Error) -> Error {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            let message = db_err.message();
            let field = if message.contains("patients.email") {
                ContactField::Email.as_str()
            } else if message.contains("patients.phone") {
                ContactField::Phone.as_str()
            } else {
                "contact"
            };
            return Error::Conflict(format!("A patient with this {field} already exists"));
        }
    }
    Error::Database(err)
}
