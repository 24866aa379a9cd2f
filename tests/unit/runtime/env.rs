use super::*;
use crate::foundation::core::Viewport;
use crate::host::memory::MemoryHost;

#[test]
fn initialization_runs_once_per_environment() {
    let env = RuntimeEnv::new();
    let mut host = MemoryHost::new(Viewport::new(1440.0, 900.0), 3000.0);
    assert!(!env.is_initialized());
    assert!(env.ensure_initialized(&mut host));
    assert!(!env.ensure_initialized(&mut host));
    assert!(env.clone().is_initialized());
    assert_eq!(host.manual_restoration_calls, 1);
}

#[test]
fn a_new_claim_retires_the_previous_lease() {
    let env = RuntimeEnv::new();
    let first = env.claim();
    assert!(first.is_current());
    let second = env.clone().claim();
    assert!(!first.is_current());
    assert!(second.is_current());
    assert_eq!(second.generation(), first.generation() + 1);
}
