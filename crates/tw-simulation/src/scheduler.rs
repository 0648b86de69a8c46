use crate::context::SimContext;
use crate::error::{SimError, SimResult};
use crate::event::SimEventKind;
use crate::task::{Task, TaskStatus};

/// Runs an ordered set of tasks once per tick, retiring those that finish.
///
/// Tasks are resumed in registration order. A task that returns
/// [`TaskStatus::Done`] is removed on the spot, so it is never resumed
/// again and the tasks after it keep their relative order.
#[derive(Debug, Default)]
pub struct Scheduler {
    tasks: Vec<Box<dyn Task>>,
}

impl Scheduler {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Register a task at the end of the run order.
    pub fn add<T: Task + 'static>(&mut self, task: T) -> SimResult<()> {
        self.add_boxed(Box::new(task))
    }

    /// Register an already boxed task at the end of the run order.
    pub fn add_boxed(&mut self, task: Box<dyn Task>) -> SimResult<()> {
        if self.contains(task.name()) {
            return Err(SimError::DuplicateTask(task.name().to_string()));
        }
        log::debug!("registered task \"{}\"", task.name());
        self.tasks.push(task);
        Ok(())
    }

    /// Resume every active task once. Returns the names of tasks retired this tick.
    pub fn run_tick(&mut self, ctx: &mut SimContext<'_>) -> Vec<String> {
        let mut retired = Vec::new();
        let mut i = 0;
        while i < self.tasks.len() {
            match self.tasks[i].step(ctx) {
                TaskStatus::Continue => i += 1,
                TaskStatus::Done => {
                    let task = self.tasks.remove(i);
                    let name = task.name().to_string();
                    log::debug!("task \"{name}\" finished at tick {}", ctx.tick());
                    ctx.emit(
                        SimEventKind::TaskRetired { task: name.clone() },
                        format!("task {name} finished"),
                    );
                    retired.push(name);
                }
            }
        }
        retired
    }

    /// Whether a task with this name is still active.
    pub fn contains(&self, name: &str) -> bool {
        self.tasks.iter().any(|t| t.name() == name)
    }

    /// Names of active tasks in run order.
    pub fn names(&self) -> Vec<&str> {
        self.tasks.iter().map(|t| t.name()).collect()
    }

    /// Number of active tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether no tasks remain.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Access an active task by downcasting to a concrete type.
    pub fn task<T: Task + 'static>(&self) -> Option<&T> {
        self.tasks
            .iter()
            .find_map(|t| t.as_any().downcast_ref::<T>())
    }

    /// Access an active task mutably by downcasting to a concrete type.
    pub fn task_mut<T: Task + 'static>(&mut self) -> Option<&mut T> {
        self.tasks
            .iter_mut()
            .find_map(|t| t.as_any_mut().downcast_mut::<T>())
    }
}
