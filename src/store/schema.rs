pub const SCHEMA: &str = r#"
-- Admins log in with username/password; provisioned out of band
CREATE TABLE IF NOT EXISTS admins (
    id TEXT PRIMARY KEY,
    username TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL       -- argon2id hash with embedded salt
);

-- Tasks assigned to students by semester and domain
CREATE TABLE IF NOT EXISTS tasks (
    id TEXT PRIMARY KEY,
    semester TEXT NOT NULL,
    domain TEXT NOT NULL,
    title TEXT NOT NULL,
    detail TEXT NOT NULL,
    creator_id TEXT NOT NULL,
    created_at TEXT DEFAULT (datetime('now')),
    updated_at TEXT DEFAULT (datetime('now'))
);

-- Students are written by the student-facing service; read-only here
CREATE TABLE IF NOT EXISTS students (
    id TEXT PRIMARY KEY,
    username TEXT NOT NULL UNIQUE,
    email TEXT NOT NULL,
    first_name TEXT NOT NULL,
    middle_name TEXT NOT NULL DEFAULT '',
    last_name TEXT NOT NULL,
    domains TEXT NOT NULL DEFAULT '[]',   -- JSON array of domain names
    dob TEXT NOT NULL,
    gender TEXT NOT NULL,
    phone_number TEXT NOT NULL,
    phone_number_alt TEXT NOT NULL DEFAULT '',
    college TEXT NOT NULL,
    course TEXT NOT NULL,
    specialization TEXT NOT NULL,
    has_arrears INTEGER NOT NULL DEFAULT 0,
    place TEXT NOT NULL,
    semester TEXT NOT NULL,
    district TEXT NOT NULL,
    state TEXT NOT NULL,
    country TEXT NOT NULL,
    date_of_joining TEXT NOT NULL DEFAULT '',
    course_ending_date TEXT NOT NULL DEFAULT '',
    password_hash TEXT NOT NULL,
    created_at TEXT DEFAULT (datetime('now')),
    updated_at TEXT DEFAULT (datetime('now'))
);

-- Submissions reference students and tasks without foreign keys:
-- a dangling reference is legal and is filtered out by the listing join
CREATE TABLE IF NOT EXISTS submissions (
    id TEXT PRIMARY KEY,
    task_id TEXT NOT NULL,
    student_id TEXT NOT NULL,
    file_url TEXT NOT NULL DEFAULT '',
    comment TEXT NOT NULL DEFAULT '',
    status TEXT NOT NULL DEFAULT 'pending'
        CHECK (status IN ('pending', 'accepted', 'rejected')),
    updated_at TEXT DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS mentors (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    title TEXT NOT NULL,
    organization TEXT NOT NULL,
    image TEXT NOT NULL,
    domain TEXT NOT NULL,
    videos TEXT NOT NULL DEFAULT '[]',    -- JSON array of {thumbnail, video}
    created_at TEXT DEFAULT (datetime('now')),
    updated_at TEXT DEFAULT (datetime('now'))
);

-- Reference lists, keyed by name
CREATE TABLE IF NOT EXISTS domains (
    name TEXT PRIMARY KEY,
    created_on TEXT DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS colleges (
    name TEXT PRIMARY KEY,
    created_on TEXT DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS courses (
    name TEXT PRIMARY KEY,
    created_on TEXT DEFAULT (datetime('now'))
);

-- Push tokens registered by the student app
CREATE TABLE IF NOT EXISTS notification_tokens (
    student_id TEXT PRIMARY KEY,
    token TEXT NOT NULL
);

-- Audit trail of notifications, written whether or not delivery succeeded
CREATE TABLE IF NOT EXISTS notifications (
    id TEXT PRIMARY KEY,
    student_id TEXT NOT NULL,
    title TEXT NOT NULL,
    content TEXT NOT NULL,
    image TEXT,
    created_at TEXT DEFAULT (datetime('now'))
);

-- Create indexes
CREATE INDEX IF NOT EXISTS idx_submissions_student ON submissions(student_id);
CREATE INDEX IF NOT EXISTS idx_submissions_task ON submissions(task_id);
CREATE INDEX IF NOT EXISTS idx_notifications_student ON notifications(student_id);
"#;
