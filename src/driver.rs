//! Argument dispatch for the `testcontainersvc` driver

use crate::container::{Config, ContainerService};
use crate::error::Result;
use tracing::info;

/// What a `testcontainersvc` invocation asks for, decided by argument count
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// `<imagePath> <imageName> [volume...]`: start a container
    Start {
        path: String,
        name: String,
        volumes: Vec<String>,
    },
    /// `<imageName>`: status, stop, status
    Cycle { image: String },
    /// No positional arguments
    Noop,
}

impl Invocation {
    /// Classify positional arguments
    pub fn from_args(args: &[String]) -> Self {
        match args {
            [] => Invocation::Noop,
            [image] => Invocation::Cycle {
                image: image.clone(),
            },
            [path, name, volumes @ ..] => Invocation::Start {
                path: path.clone(),
                name: name.clone(),
                volumes: volumes.to_vec(),
            },
        }
    }
}

/// Perform the invocation against `service`, stopping at the first error
pub fn run(invocation: &Invocation, service: &dyn ContainerService) -> Result<()> {
    match invocation {
        Invocation::Start {
            path,
            name,
            volumes,
        } => {
            let config = Config::with_volumes(volumes.clone());
            service.start(path, name, &config)
        }
        Invocation::Cycle { image } => {
            service.status(image, "")?;
            service.stop(image, "", false)?;
            service.status(image, "")
        }
        Invocation::Noop => {
            info!("Nothing to do");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SvcError;
    use std::cell::RefCell;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Start(String, String, Vec<String>),
        Status(String, String),
        Stop(String, String, bool),
    }

    /// Records calls; fails the call with index `fail_at` if set
    #[derive(Default)]
    struct RecordingService {
        calls: RefCell<Vec<Call>>,
        fail_at: Option<usize>,
    }

    impl RecordingService {
        fn failing_at(index: usize) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                fail_at: Some(index),
            }
        }

        fn record(&self, call: Call) -> Result<()> {
            let mut calls = self.calls.borrow_mut();
            calls.push(call);
            if self.fail_at == Some(calls.len() - 1) {
                return Err(SvcError::Runtime {
                    command: "docker".to_string(),
                    status: "exit status 1".to_string(),
                    stderr: "daemon unavailable".to_string(),
                });
            }
            Ok(())
        }
    }

    impl ContainerService for RecordingService {
        fn start(&self, path: &str, name: &str, config: &Config) -> Result<()> {
            self.record(Call::Start(path.into(), name.into(), config.volumes.clone()))
        }

        fn status(&self, name: &str, id: &str) -> Result<()> {
            self.record(Call::Status(name.into(), id.into()))
        }

        fn stop(&self, name: &str, id: &str, force: bool) -> Result<()> {
            self.record(Call::Stop(name.into(), id.into(), force))
        }
    }

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    fn dispatch(args: &[&str], service: &RecordingService) -> Result<()> {
        run(&Invocation::from_args(&strings(args)), service)
    }

    #[test]
    fn test_two_args_start_without_volumes() {
        let service = RecordingService::default();
        dispatch(&["/tmp/nutanix_test.tar", "nutanix_test"], &service).unwrap();

        assert_eq!(
            *service.calls.borrow(),
            vec![Call::Start(
                "/tmp/nutanix_test.tar".into(),
                "nutanix_test".into(),
                vec![]
            )]
        );
    }

    #[test]
    fn test_extra_args_are_volumes_in_order() {
        let service = RecordingService::default();
        dispatch(
            &["/tmp/img.tar", "img", "vol_a:/a", "vol_b:/b", "/host:/c:ro"],
            &service,
        )
        .unwrap();

        assert_eq!(
            *service.calls.borrow(),
            vec![Call::Start(
                "/tmp/img.tar".into(),
                "img".into(),
                strings(&["vol_a:/a", "vol_b:/b", "/host:/c:ro"])
            )]
        );
    }

    #[test]
    fn test_one_arg_status_stop_status() {
        let service = RecordingService::default();
        dispatch(&["nutanix_test"], &service).unwrap();

        assert_eq!(
            *service.calls.borrow(),
            vec![
                Call::Status("nutanix_test".into(), "".into()),
                Call::Stop("nutanix_test".into(), "".into(), false),
                Call::Status("nutanix_test".into(), "".into()),
            ]
        );
    }

    #[test]
    fn test_no_args_makes_no_calls() {
        let service = RecordingService::default();
        dispatch(&[], &service).unwrap();
        assert!(service.calls.borrow().is_empty());
        assert_eq!(Invocation::from_args(&[]), Invocation::Noop);
    }

    #[test]
    fn test_first_error_halts_cycle() {
        let service = RecordingService::failing_at(0);
        assert!(dispatch(&["img"], &service).is_err());
        assert_eq!(service.calls.borrow().len(), 1);

        let service = RecordingService::failing_at(1);
        assert!(dispatch(&["img"], &service).is_err());
        assert_eq!(
            service.calls.borrow().last(),
            Some(&Call::Stop("img".into(), "".into(), false))
        );
        assert_eq!(service.calls.borrow().len(), 2);
    }

    #[test]
    fn test_start_error_is_returned() {
        let service = RecordingService::failing_at(0);
        let result = dispatch(&["/tmp/img.tar", "img"], &service);
        assert!(matches!(result, Err(SvcError::Runtime { .. })));
    }
}
