use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::Store;
use super::schema::SCHEMA;
use crate::error::{Error, Result};
use crate::types::*;

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.pragma_update(None, "journal_mode", "WAL")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Opens a private in-memory database. Used by tests and tooling.
    pub fn in_memory() -> Result<Self> {
        Ok(Self {
            conn: Mutex::new(Connection::open_in_memory()?),
        })
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            // Handle SQLite's default datetime format: "YYYY-MM-DD HH:MM:SS"
            chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            tracing::error!("Invalid datetime in database: '{}' - {}", s, e);
            Utc::now()
        })
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

fn get_datetime(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    Ok(parse_datetime(&row.get::<_, String>(idx)?))
}

fn get_json<T: DeserializeOwned>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T> {
    let raw: String = row.get(idx)?;
    serde_json::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// Maps unique-constraint failures to `Error::AlreadyExists`.
fn map_conflict(result: rusqlite::Result<usize>) -> Result<()> {
    match result {
        Ok(_) => Ok(()),
        Err(rusqlite::Error::SqliteFailure(err, _))
            if err.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Err(Error::AlreadyExists)
        }
        Err(e) => Err(Error::from(e)),
    }
}

const TASK_COLUMNS: &str =
    "id, semester, domain, title, detail, creator_id, created_at, updated_at";

fn task_from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(offset)?,
        semester: row.get(offset + 1)?,
        domain: row.get(offset + 2)?,
        title: row.get(offset + 3)?,
        detail: row.get(offset + 4)?,
        creator_id: row.get(offset + 5)?,
        created_at: get_datetime(row, offset + 6)?,
        updated_at: get_datetime(row, offset + 7)?,
    })
}

const SUBMISSION_COLUMNS: &str = "id, task_id, student_id, file_url, comment, status, updated_at";

fn submission_from_row(row: &Row<'_>) -> rusqlite::Result<Submission> {
    Ok(Submission {
        id: row.get(0)?,
        task_id: row.get(1)?,
        student_id: row.get(2)?,
        file_url: row.get(3)?,
        comment: row.get(4)?,
        status: row.get(5)?,
        updated_at: get_datetime(row, 6)?,
    })
}

const MENTOR_COLUMNS: &str =
    "id, name, title, organization, image, domain, videos, created_at, updated_at";

fn mentor_from_row(row: &Row<'_>) -> rusqlite::Result<Mentor> {
    Ok(Mentor {
        id: row.get(0)?,
        name: row.get(1)?,
        title: row.get(2)?,
        organization: row.get(3)?,
        image: row.get(4)?,
        domain: row.get(5)?,
        videos: get_json(row, 6)?,
        created_at: get_datetime(row, 7)?,
        updated_at: get_datetime(row, 8)?,
    })
}

fn student_from_row(row: &Row<'_>) -> rusqlite::Result<Student> {
    Ok(Student {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        first_name: row.get(3)?,
        middle_name: row.get(4)?,
        last_name: row.get(5)?,
        domains: get_json(row, 6)?,
        dob: row.get(7)?,
        gender: row.get(8)?,
        phone_number: row.get(9)?,
        phone_number_alt: row.get(10)?,
        college: row.get(11)?,
        course: row.get(12)?,
        specialization: row.get(13)?,
        has_arrears: row.get(14)?,
        place: row.get(15)?,
        semester: row.get(16)?,
        district: row.get(17)?,
        state: row.get(18)?,
        country: row.get(19)?,
        date_of_joining: row.get(20)?,
        course_ending_date: row.get(21)?,
        password_hash: row.get(22)?,
        created_at: get_datetime(row, 23)?,
        updated_at: get_datetime(row, 24)?,
    })
}

impl Store for SqliteStore {
    fn initialize(&self) -> Result<()> {
        self.conn().execute_batch(SCHEMA)?;
        Ok(())
    }

    // Admin operations

    fn upsert_admin(&self, username: &str, password_hash: &str) -> Result<ObjectId> {
        let id = self.conn().query_row(
            "INSERT INTO admins (id, username, password_hash) VALUES (?1, ?2, ?3)
             ON CONFLICT (username) DO UPDATE SET password_hash = excluded.password_hash
             RETURNING id",
            params![ObjectId::new(), username, password_hash],
            |row| row.get(0),
        )?;
        Ok(id)
    }

    fn get_admin_by_username(&self, username: &str) -> Result<Option<Admin>> {
        let conn = self.conn();
        conn.query_row(
            "SELECT id, username, password_hash FROM admins WHERE username = ?1",
            params![username],
            |row| {
                Ok(Admin {
                    id: row.get(0)?,
                    username: row.get(1)?,
                    password_hash: row.get(2)?,
                })
            },
        )
        .optional()
        .map_err(Error::from)
    }

    fn has_admin(&self) -> Result<bool> {
        let conn = self.conn();
        let count: i32 = conn.query_row("SELECT COUNT(*) FROM admins", [], |row| row.get(0))?;
        Ok(count > 0)
    }

    // Task operations

    fn create_task(&self, task: &Task) -> Result<()> {
        self.conn().execute(
            "INSERT INTO tasks (id, semester, domain, title, detail, creator_id, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                task.id,
                task.semester,
                task.domain,
                task.title,
                task.detail,
                task.creator_id,
                format_datetime(&task.created_at),
                format_datetime(&task.updated_at),
            ],
        )?;
        Ok(())
    }

    fn upsert_task(&self, task: &Task) -> Result<()> {
        self.conn().execute(
            "INSERT INTO tasks (id, semester, domain, title, detail, creator_id, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             ON CONFLICT (id) DO UPDATE SET
                semester = excluded.semester,
                domain = excluded.domain,
                title = excluded.title,
                detail = excluded.detail,
                updated_at = excluded.updated_at",
            params![
                task.id,
                task.semester,
                task.domain,
                task.title,
                task.detail,
                task.creator_id,
                format_datetime(&task.created_at),
                format_datetime(&task.updated_at),
            ],
        )?;
        Ok(())
    }

    fn get_task(&self, id: &ObjectId) -> Result<Option<Task>> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"),
            params![id],
            |row| task_from_row(row, 0),
        )
        .optional()
        .map_err(Error::from)
    }

    fn list_tasks(&self) -> Result<Vec<Task>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!("SELECT {TASK_COLUMNS} FROM tasks"))?;
        let rows = stmt.query_map([], |row| task_from_row(row, 0))?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn delete_task(&self, id: &ObjectId) -> Result<bool> {
        let rows = self
            .conn()
            .execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }

    // Student operations

    fn create_student(&self, s: &Student) -> Result<()> {
        let domains = to_json(&s.domains)?;
        let result = self.conn().execute(
            "INSERT INTO students (id, username, email, first_name, middle_name, last_name, domains,
                dob, gender, phone_number, phone_number_alt, college, course, specialization,
                has_arrears, place, semester, district, state, country, date_of_joining,
                course_ending_date, password_hash, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16,
                ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25)",
            params![
                s.id,
                s.username,
                s.email,
                s.first_name,
                s.middle_name,
                s.last_name,
                domains,
                s.dob,
                s.gender,
                s.phone_number,
                s.phone_number_alt,
                s.college,
                s.course,
                s.specialization,
                s.has_arrears,
                s.place,
                s.semester,
                s.district,
                s.state,
                s.country,
                s.date_of_joining,
                s.course_ending_date,
                s.password_hash,
                format_datetime(&s.created_at),
                format_datetime(&s.updated_at),
            ],
        );
        map_conflict(result)
    }

    fn list_students(&self) -> Result<Vec<Student>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, username, email, first_name, middle_name, last_name, domains, dob, gender,
                phone_number, phone_number_alt, college, course, specialization, has_arrears,
                place, semester, district, state, country, date_of_joining, course_ending_date,
                password_hash, created_at, updated_at
             FROM students",
        )?;
        let rows = stmt.query_map([], student_from_row)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    // Submission operations

    fn create_submission(&self, submission: &Submission) -> Result<()> {
        self.conn().execute(
            "INSERT INTO submissions (id, task_id, student_id, file_url, comment, status, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                submission.id,
                submission.task_id,
                submission.student_id,
                submission.file_url,
                submission.comment,
                submission.status,
                format_datetime(&submission.updated_at),
            ],
        )?;
        Ok(())
    }

    fn get_submission(&self, id: &ObjectId) -> Result<Option<Submission>> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {SUBMISSION_COLUMNS} FROM submissions WHERE id = ?1"),
            params![id],
            submission_from_row,
        )
        .optional()
        .map_err(Error::from)
    }

    fn update_submission_status(&self, id: &ObjectId, status: Status) -> Result<Submission> {
        let conn = self.conn();
        conn.query_row(
            &format!(
                "UPDATE submissions SET status = ?1, updated_at = ?2 WHERE id = ?3
                 RETURNING {SUBMISSION_COLUMNS}"
            ),
            params![status, format_datetime(&Utc::now()), id],
            submission_from_row,
        )
        .optional()?
        .ok_or(Error::NotFound)
    }

    fn list_submission_views(&self, student_id: Option<&ObjectId>) -> Result<Vec<SubmissionView>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT s.id, s.updated_at, s.file_url, s.status, s.comment,
                t.id, t.semester, t.domain, t.title, t.detail, t.creator_id, t.created_at, t.updated_at,
                st.id, st.username
             FROM submissions s
             JOIN students st ON st.id = s.student_id
             JOIN tasks t ON t.id = s.task_id
             WHERE ?1 IS NULL OR s.student_id = ?1",
        )?;

        let rows = stmt.query_map(params![student_id], |row| {
            Ok(SubmissionView {
                id: row.get(0)?,
                updated_at: get_datetime(row, 1)?,
                file_url: row.get(2)?,
                status: row.get(3)?,
                comment: row.get(4)?,
                task: task_from_row(row, 5)?,
                student: StudentRef {
                    id: row.get(13)?,
                    username: row.get(14)?,
                },
            })
        })?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    // Mentor operations

    fn create_mentor(&self, mentor: &Mentor) -> Result<()> {
        let videos = to_json(&mentor.videos)?;
        let result = self.conn().execute(
            &format!(
                "INSERT INTO mentors ({MENTOR_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"
            ),
            params![
                mentor.id,
                mentor.name,
                mentor.title,
                mentor.organization,
                mentor.image,
                mentor.domain,
                videos,
                format_datetime(&mentor.created_at),
                format_datetime(&mentor.updated_at),
            ],
        );
        map_conflict(result)
    }

    fn upsert_mentor(&self, mentor: &Mentor) -> Result<()> {
        let videos = to_json(&mentor.videos)?;
        let result = self.conn().execute(
            &format!(
                "INSERT INTO mentors ({MENTOR_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                 ON CONFLICT (id) DO UPDATE SET
                    name = excluded.name,
                    title = excluded.title,
                    organization = excluded.organization,
                    image = excluded.image,
                    domain = excluded.domain,
                    videos = excluded.videos,
                    updated_at = excluded.updated_at"
            ),
            params![
                mentor.id,
                mentor.name,
                mentor.title,
                mentor.organization,
                mentor.image,
                mentor.domain,
                videos,
                format_datetime(&mentor.created_at),
                format_datetime(&mentor.updated_at),
            ],
        );
        map_conflict(result)
    }

    fn get_mentor(&self, id: &ObjectId) -> Result<Option<Mentor>> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {MENTOR_COLUMNS} FROM mentors WHERE id = ?1"),
            params![id],
            mentor_from_row,
        )
        .optional()
        .map_err(Error::from)
    }

    fn list_mentors(&self) -> Result<Vec<Mentor>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!("SELECT {MENTOR_COLUMNS} FROM mentors"))?;
        let rows = stmt.query_map([], mentor_from_row)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    // Reference list operations

    fn upsert_reference(&self, kind: ReferenceKind, item: &ReferenceItem) -> Result<()> {
        self.conn().execute(
            &format!(
                "INSERT INTO {} (name, created_on) VALUES (?1, ?2)
                 ON CONFLICT (name) DO UPDATE SET created_on = excluded.created_on",
                kind.table()
            ),
            params![item.name, format_datetime(&item.created_on)],
        )?;
        Ok(())
    }

    fn list_references(&self, kind: ReferenceKind) -> Result<Vec<ReferenceItem>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT name, created_on FROM {} ORDER BY rowid",
            kind.table()
        ))?;
        let rows = stmt.query_map([], |row| {
            Ok(ReferenceItem {
                name: row.get(0)?,
                created_on: get_datetime(row, 1)?,
            })
        })?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    // Notification operations

    fn set_notification_token(&self, token: &NotificationToken) -> Result<()> {
        self.conn().execute(
            "INSERT INTO notification_tokens (student_id, token) VALUES (?1, ?2)
             ON CONFLICT (student_id) DO UPDATE SET token = excluded.token",
            params![token.student_id, token.token],
        )?;
        Ok(())
    }

    fn get_notification_token(&self, student_id: &ObjectId) -> Result<Option<NotificationToken>> {
        let conn = self.conn();
        conn.query_row(
            "SELECT student_id, token FROM notification_tokens WHERE student_id = ?1",
            params![student_id],
            |row| {
                Ok(NotificationToken {
                    student_id: row.get(0)?,
                    token: row.get(1)?,
                })
            },
        )
        .optional()
        .map_err(Error::from)
    }

    fn create_notification(&self, receipt: &NotificationReceipt) -> Result<()> {
        self.conn().execute(
            "INSERT INTO notifications (id, student_id, title, content, image, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                receipt.id,
                receipt.student_id,
                receipt.title,
                receipt.content,
                receipt.image,
                format_datetime(&receipt.created_at),
            ],
        )?;
        Ok(())
    }

    fn list_notifications(&self, student_id: &ObjectId) -> Result<Vec<NotificationReceipt>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, student_id, title, content, image, created_at
             FROM notifications WHERE student_id = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map(params![student_id], |row| {
            Ok(NotificationReceipt {
                id: row.get(0)?,
                student_id: row.get(1)?,
                title: row.get(2)?,
                content: row.get(3)?,
                image: row.get(4)?,
                created_at: get_datetime(row, 5)?,
            })
        })?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }
}
