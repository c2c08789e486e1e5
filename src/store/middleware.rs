//! Interceptors that sit in front of every reducer.

use crate::state::Transition;

/// Cross-cutting interceptor over state transitions.
///
/// A middleware may forward extra messages before or after the one it
/// received, but must always forward the original exactly once.
pub trait Middleware: Send + Sync {
    fn handle(&self, transition: Transition, next: &mut dyn FnMut(Transition));
}

/// Turns an HTTP 401 on a settled request into a session reset.
///
/// Handlers never check for 401 themselves; any operation whose request
/// settles with 401 invalidates the session here.
pub struct AuthInterceptor;

impl Middleware for AuthInterceptor {
    fn handle(&self, transition: Transition, next: &mut dyn FnMut(Transition)) {
        if transition.status() == Some(401) {
            tracing::info!("Backend rejected the session token, invalidating session");
            next(Transition::InvalidSession);
        }
        next(transition);
    }
}

/// Pass `transition` through `chain` in order, collecting what reaches
/// the end of it.
pub(crate) fn run_chain(
    chain: &[Box<dyn Middleware>],
    transition: Transition,
    out: &mut Vec<Transition>,
) {
    match chain.split_first() {
        None => out.push(transition),
        Some((first, rest)) => first.handle(transition, &mut |next| run_chain(rest, next, out)),
    }
}
