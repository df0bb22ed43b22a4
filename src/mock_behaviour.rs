//! Planned failures for mocked task sources

use std::error::Error;

/// How a [`MockSource`](crate::mock_source::MockSource) answers during a test.
///
/// Every operation has a `(m, n)` counter: it succeeds `m` times, then fails `n` times, then always succeeds.
#[derive(Default, Clone, Debug)]
pub struct MockBehaviour {
    pub is_suspended: bool,

    pub fetch_tasks_behaviour: (u32, u32),
    pub create_task_behaviour: (u32, u32),
    pub update_task_behaviour: (u32, u32),
    pub set_task_status_behaviour: (u32, u32),
    pub delete_task_behaviour: (u32, u32),
}

impl MockBehaviour {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every operation fails its next `n_fails` calls
    pub fn fail_now(n_fails: u32) -> Self {
        Self {
            is_suspended: false,
            fetch_tasks_behaviour: (0, n_fails),
            create_task_behaviour: (0, n_fails),
            update_task_behaviour: (0, n_fails),
            set_task_status_behaviour: (0, n_fails),
            delete_task_behaviour: (0, n_fails),
        }
    }

    /// Let every call succeed, without consuming the counters
    pub fn suspend(&mut self) { self.is_suspended = true; }
    pub fn resume(&mut self)  { self.is_suspended = false; }

    pub fn can_fetch_tasks(&mut self) -> Result<(), Box<dyn Error>> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.fetch_tasks_behaviour, "fetch_tasks")
    }
    pub fn can_create_task(&mut self) -> Result<(), Box<dyn Error>> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.create_task_behaviour, "create_task")
    }
    pub fn can_update_task(&mut self) -> Result<(), Box<dyn Error>> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.update_task_behaviour, "update_task")
    }
    pub fn can_set_task_status(&mut self) -> Result<(), Box<dyn Error>> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.set_task_status_behaviour, "set_task_status")
    }
    pub fn can_delete_task(&mut self) -> Result<(), Box<dyn Error>> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.delete_task_behaviour, "delete_task")
    }
}


/// Consume one planned outcome of an operation: successes first, then failures, then successes forever
fn decrement(counters: &mut (u32, u32), operation: &str) -> Result<(), Box<dyn Error>> {
    match counters {
        (successes, _) if *successes > 0 => *successes -= 1,
        (_, failures) if *failures > 0 => {
            *failures -= 1;
            log::debug!("Mock behaviour: {} fails, {:?} left", operation, counters);
            return Err(format!("Mocked failure of {} ({:?} left)", operation, counters).into());
        },
        _ => {},
    }
    log::debug!("Mock behaviour: {} succeeds, {:?} left", operation, counters);
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_mock_behaviour() {
        let mut ok = MockBehaviour::new();
        for _ in 0..5 {
            assert!(ok.can_fetch_tasks().is_ok());
            assert!(ok.can_delete_task().is_ok());
        }

        let mut now = MockBehaviour::fail_now(2);
        assert!(now.can_fetch_tasks().is_err());
        assert!(now.can_create_task().is_err());
        assert!(now.can_create_task().is_err());
        assert!(now.can_fetch_tasks().is_err());
        assert!(now.can_fetch_tasks().is_ok());
        assert!(now.can_create_task().is_ok());

        let mut custom = MockBehaviour{
            fetch_tasks_behaviour: (0,1),
            set_task_status_behaviour: (1,2),
            ..MockBehaviour::default()
        };
        assert!(custom.can_fetch_tasks().is_err());
        assert!(custom.can_fetch_tasks().is_ok());
        assert!(custom.can_set_task_status().is_ok());
        assert!(custom.can_set_task_status().is_err());
        custom.suspend();
        assert!(custom.can_set_task_status().is_ok());
        custom.resume();
        assert!(custom.can_set_task_status().is_err());
        assert!(custom.can_set_task_status().is_ok());
    }
}
