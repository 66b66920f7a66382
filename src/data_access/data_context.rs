use chrono::Utc;
use redb::{Database, ReadableTable, TableDefinition};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    authentication::auth::hash_password,
    data_access::{data_error::DataError, owned_tasks::OwnedTasks},
    session::Session,
    task::Task,
    user::User,
};

const USERS_TABLE: TableDefinition<&[u8], &[u8]> = TableDefinition::new("users");
const USERNAME_INDEX: TableDefinition<&str, &[u8]> = TableDefinition::new("username_index");
const TASKS_TABLE: TableDefinition<&[u8], &[u8]> = TableDefinition::new("tasks");
const SESSIONS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("sessions");

/// Handle to the redb file holding users, sessions and tasks. Cloneable (Arc inside).
#[derive(Clone)]
pub struct DataContext {
    db: Arc<Database>,
}

impl DataContext {
    /// Open (or create) the database at `path`. Creates tables if they don't exist.
    pub fn new(path: &str) -> Result<Self, DataError> {
        let db = Database::create(path)?;
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(USERS_TABLE)?;
            let _ = write_txn.open_table(USERNAME_INDEX)?;
            let _ = write_txn.open_table(TASKS_TABLE)?;
            let _ = write_txn.open_table(SESSIONS_TABLE)?;
        }
        write_txn.commit()?;
        Ok(DataContext { db: Arc::new(db) })
    }

    // USERS

    /// Inserts `user`, failing with `DuplicateUsername` if the name is taken.
    pub fn create_user(&self, user: &User) -> Result<(), DataError> {
        let write_txn = self.db.begin_write()?;
        {
            let mut users_table = write_txn.open_table(USERS_TABLE)?;
            let mut username_index = write_txn.open_table(USERNAME_INDEX)?;
            if username_index.get(user.username.as_str())?.is_some() {
                return Err(DataError::DuplicateUsername(user.username.clone()));
            }
            let user_bytes = encode(user)?;
            let id_bytes = user.id.as_bytes();
            users_table.insert(id_bytes.as_slice(), user_bytes.as_slice())?;
            username_index.insert(user.username.as_str(), id_bytes.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    pub fn get_user(&self, id: Uuid) -> Result<Option<User>, DataError> {
        let read_txn = self.db.begin_read()?;
        let users_table = read_txn.open_table(USERS_TABLE)?;
        let id_bytes = id.as_bytes();
        match users_table.get(id_bytes.as_slice())? {
            Some(data) => Ok(Some(decode(data.value())?)),
            None => Ok(None),
        }
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<User>, DataError> {
        let read_txn = self.db.begin_read()?;
        let username_index = read_txn.open_table(USERNAME_INDEX)?;

        match username_index.get(username)? {
            Some(id_data) => {
                let users_table = read_txn.open_table(USERS_TABLE)?;
                match users_table.get(id_data.value())? {
                    Some(user_data) => Ok(Some(decode(user_data.value())?)),
                    None => Ok(None),
                }
            }
            None => Ok(None),
        }
    }

    pub fn list_users(&self) -> Result<Vec<User>, DataError> {
        let read_txn = self.db.begin_read()?;
        let users_table = read_txn.open_table(USERS_TABLE)?;

        let mut users = Vec::new();
        for entry in users_table.iter()? {
            let (_, value) = entry?;
            users.push(decode(value.value())?);
        }
        Ok(users)
    }

    /// Seeds a superuser when no users exist. Returns true if one was created.
    pub fn ensure_default_user(&self, username: &str, password: &str) -> Result<bool, DataError> {
        if !self.list_users()?.is_empty() {
            return Ok(false);
        }
        let admin = User::new_superuser(username, hash_password(password)?);
        self.create_user(&admin)?;
        Ok(true)
    }

    // SESSIONS

    /// Stores `session` and drops any sessions that have already expired.
    pub fn create_session(&self, session: &Session) -> Result<(), DataError> {
        let now = Utc::now();
        let write_txn = self.db.begin_write()?;
        {
            let mut sessions_table = write_txn.open_table(SESSIONS_TABLE)?;
            let mut expired = Vec::new();
            for entry in sessions_table.iter()? {
                let (token, value) = entry?;
                let stored: Session = decode(value.value())?;
                if stored.is_expired_at(now) {
                    expired.push(token.value().to_string());
                }
            }
            for token in &expired {
                sessions_table.remove(token.as_str())?;
            }

            let session_bytes = encode(session)?;
            sessions_table.insert(session.token.as_str(), session_bytes.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    pub fn get_session(&self, token: &str) -> Result<Option<Session>, DataError> {
        let read_txn = self.db.begin_read()?;
        let sessions_table = read_txn.open_table(SESSIONS_TABLE)?;
        match sessions_table.get(token)? {
            Some(data) => Ok(Some(decode(data.value())?)),
            None => Ok(None),
        }
    }

    pub fn delete_session(&self, token: &str) -> Result<bool, DataError> {
        let write_txn = self.db.begin_write()?;
        let deleted;
        {
            let mut sessions_table = write_txn.open_table(SESSIONS_TABLE)?;
            deleted = sessions_table.remove(token)?.is_some();
        }
        write_txn.commit()?;
        Ok(deleted)
    }

    // TASKS

    /// Task access restricted to rows owned by `owner`.
    pub fn tasks_owned_by<'a>(&'a self, owner: &'a User) -> OwnedTasks<'a> {
        OwnedTasks::new(self, owner)
    }

    pub fn create_task(&self, task: &Task) -> Result<(), DataError> {
        let write_txn = self.db.begin_write()?;
        {
            let mut tasks_table = write_txn.open_table(TASKS_TABLE)?;
            let task_bytes = encode(task)?;
            let id_bytes = task.id.as_bytes();
            tasks_table.insert(id_bytes.as_slice(), task_bytes.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    pub fn get_task(&self, id: Uuid) -> Result<Option<Task>, DataError> {
        let read_txn = self.db.begin_read()?;
        let tasks_table = read_txn.open_table(TASKS_TABLE)?;

        let id_bytes = id.as_bytes();
        match tasks_table.get(id_bytes.as_slice())? {
            Some(data) => Ok(Some(decode(data.value())?)),
            None => Ok(None),
        }
    }

    /// Every task, newest first.
    pub fn list_tasks(&self) -> Result<Vec<Task>, DataError> {
        self.scan_tasks(|_| true)
    }

    /// Tasks belonging to `owner`, newest first.
    pub fn list_tasks_by_owner(&self, owner: Uuid) -> Result<Vec<Task>, DataError> {
        self.scan_tasks(|task| task.owner == owner)
    }

    /// Reads task `id` and hands it to `change` inside one write transaction.
    /// The task is written back only when `change` returns true.
    /// Returns the stored task, or `None` if it is missing or `change` declined.
    pub fn modify_task<F>(&self, id: Uuid, change: F) -> Result<Option<Task>, DataError>
    where
        F: FnOnce(&mut Task) -> bool,
    {
        let write_txn = self.db.begin_write()?;
        let modified;
        {
            let mut tasks_table = write_txn.open_table(TASKS_TABLE)?;
            let id_bytes = id.as_bytes();
            let current: Option<Task> = match tasks_table.get(id_bytes.as_slice())? {
                Some(data) => Some(decode(data.value())?),
                None => None,
            };
            modified = match current {
                Some(mut task) => {
                    if change(&mut task) {
                        let task_bytes = encode(&task)?;
                        tasks_table.insert(id_bytes.as_slice(), task_bytes.as_slice())?;
                        Some(task)
                    } else {
                        None
                    }
                }
                None => None,
            };
        }
        if modified.is_some() {
            write_txn.commit()?;
        } else {
            write_txn.abort()?;
        }
        Ok(modified)
    }

    /// Removes task `id` if `accept` approves it, inside one write transaction.
    /// Returns the removed task.
    pub fn remove_task_if<F>(&self, id: Uuid, accept: F) -> Result<Option<Task>, DataError>
    where
        F: FnOnce(&Task) -> bool,
    {
        let write_txn = self.db.begin_write()?;
        let removed;
        {
            let mut tasks_table = write_txn.open_table(TASKS_TABLE)?;
            let id_bytes = id.as_bytes();
            let current: Option<Task> = match tasks_table.get(id_bytes.as_slice())? {
                Some(data) => Some(decode(data.value())?),
                None => None,
            };
            removed = match current {
                Some(task) => {
                    if accept(&task) {
                        tasks_table.remove(id_bytes.as_slice())?;
                        Some(task)
                    } else {
                        None
                    }
                }
                None => None,
            };
        }
        if removed.is_some() {
            write_txn.commit()?;
        } else {
            write_txn.abort()?;
        }
        Ok(removed)
    }

    fn scan_tasks<F>(&self, keep: F) -> Result<Vec<Task>, DataError>
    where
        F: Fn(&Task) -> bool,
    {
        let read_txn = self.db.begin_read()?;
        let tasks_table = read_txn.open_table(TASKS_TABLE)?;

        let mut tasks = Vec::new();
        for entry in tasks_table.iter()? {
            let (_, value) = entry?;
            let task: Task = decode(value.value())?;
            if keep(&task) {
                tasks.push(task);
            }
        }

        // Sort by created_at descending
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tasks)
    }
}

fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, DataError> {
    postcard::to_allocvec(value).map_err(|e| DataError::Encode(e.to_string()))
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, DataError> {
    postcard::from_bytes(bytes).map_err(|e| DataError::Decode(e.to_string()))
}
