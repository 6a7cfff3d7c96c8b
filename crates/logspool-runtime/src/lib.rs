//! Container runtime access for logspool
//!
//! The adapter talks to the container runtime only through the
//! [`ContainerRuntime`] trait: inspect one container, list the running
//! ones, subscribe to lifecycle events, and follow a container's log
//! stream. [`DockerRuntime`] implements it against the Docker Engine API
//! over a Unix socket; [`MockRuntime`] is an in-memory implementation for
//! tests.

mod docker;
mod http;
mod mock;
mod traits;

pub use docker::DockerRuntime;
pub use mock::MockRuntime;
pub use traits::ContainerRuntime;
