/// Receives solver events and decides how the iteration should proceed.
///
/// Solvers emit one event per iteration. Returning `Some(action)` requests a
/// solver-specific action and `None` lets the solver continue unchanged.
///
/// Closures implement `Observer` automatically, and `()` is a no-op observer.
pub trait Observer<E, A> {
    /// Observes a solver event and optionally returns a control action.
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drive<O: Observer<usize, &'static str>>(mut observer: O, events: &[usize]) -> Option<usize> {
        events
            .iter()
            .find(|event| observer.observe(event).is_some())
            .copied()
    }

    #[test]
    fn unit_observer_never_acts() {
        assert_eq!(drive((), &[1, 2, 3]), None);
    }

    #[test]
    fn closure_observer_can_act() {
        let mut seen = Vec::new();
        let stopped = drive(
            |event: &usize| {
                seen.push(*event);
                (*event == 2).then_some("stop")
            },
            &[1, 2, 3],
        );

        assert_eq!(stopped, Some(2));
        assert_eq!(seen, vec![1, 2]);
    }
}
