//! Ordered collection of frame systems

use crate::system::FrameSystem;
use log::trace;
use tableau_core::Result;

/// Ticks registered systems in registration order
#[derive(Default)]
pub struct SystemSchedule {
    systems: Vec<Box<dyn FrameSystem>>,
}

impl SystemSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, system: Box<dyn FrameSystem>) {
        self.systems.push(system);
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Names in tick order
    pub fn names(&self) -> Vec<&str> {
        self.systems.iter().map(|s| s.name()).collect()
    }

    /// Update every system. Stops at the first error.
    pub fn update(&mut self, dt_ms: f32) -> Result<()> {
        for system in &mut self.systems {
            trace!("tick {} ({dt_ms} ms)", system.name());
            system.update(dt_ms)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tableau_core::TableauError;

    struct Recorder {
        name: &'static str,
        log: Rc<RefCell<Vec<(String, f32)>>>,
        fail: bool,
    }

    impl FrameSystem for Recorder {
        fn update(&mut self, dt_ms: f32) -> Result<()> {
            self.log.borrow_mut().push((self.name.to_string(), dt_ms));
            if self.fail {
                return Err(TableauError::RuntimeError(self.name.to_string()));
            }
            Ok(())
        }

        fn name(&self) -> &str {
            self.name
        }
    }

    #[test]
    fn ticks_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut schedule = SystemSchedule::new();
        for name in ["director", "particles"] {
            schedule.add(Box::new(Recorder {
                name,
                log: log.clone(),
                fail: false,
            }));
        }
        assert_eq!(schedule.names(), vec!["director", "particles"]);

        schedule.update(16.0).unwrap();
        let log = log.borrow();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].0, "director");
        assert_eq!(log[1].0, "particles");
        assert_eq!(log[1].1, 16.0);
    }

    #[test]
    fn stops_at_first_error() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut schedule = SystemSchedule::new();
        schedule.add(Box::new(Recorder {
            name: "broken",
            log: log.clone(),
            fail: true,
        }));
        schedule.add(Box::new(Recorder {
            name: "after",
            log: log.clone(),
            fail: false,
        }));

        assert!(schedule.update(16.0).is_err());
        assert_eq!(log.borrow().len(), 1);
    }
}
