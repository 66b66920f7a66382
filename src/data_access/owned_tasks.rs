use uuid::Uuid;

use crate::{
    data_access::{data_context::DataContext, data_error::DataError, task_filter::TaskFilter},
    task::{NewTask, Task, TaskChanges},
    user::User,
};

/// The slice of the task table a single user may see.
///
/// Every lookup is confined to rows whose `owner` is the caller. A task that
/// exists but belongs to someone else is reported exactly like a missing one
/// (`None`), so callers cannot probe for other users' ids.
pub struct OwnedTasks<'a> {
    context: &'a DataContext,
    owner: &'a User,
}

impl<'a> OwnedTasks<'a> {
    pub fn new(context: &'a DataContext, owner: &'a User) -> Self {
        Self { context, owner }
    }

    /// The caller's tasks matching `filter`, newest first.
    pub fn list(&self, filter: &TaskFilter) -> Result<Vec<Task>, DataError> {
        let tasks = self.context.list_tasks_by_owner(self.owner.id)?;
        Ok(filter.apply(tasks))
    }

    pub fn get(&self, id: Uuid) -> Result<Option<Task>, DataError> {
        Ok(self
            .context
            .get_task(id)?
            .filter(|task| task.owner == self.owner.id))
    }

    /// Stores a new task owned by the caller.
    pub fn create(&self, new_task: NewTask) -> Result<Task, DataError> {
        let task = Task::new(self.owner.id, new_task);
        self.context.create_task(&task)?;
        Ok(task)
    }

    pub fn update(&self, id: Uuid, changes: &TaskChanges) -> Result<Option<Task>, DataError> {
        let owner = self.owner.id;
        self.context.modify_task(id, |task| {
            if task.owner != owner {
                return false;
            }
            task.apply(changes);
            true
        })
    }

    /// Removes the task and returns it as it was before deletion.
    pub fn delete(&self, id: Uuid) -> Result<Option<Task>, DataError> {
        let owner = self.owner.id;
        self.context.remove_task_if(id, |task| task.owner == owner)
    }
}
