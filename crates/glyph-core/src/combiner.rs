use crate::event::Event;

/// A stateful transducer from keystroke events to composed script text.
///
/// Calls for one instance are strictly sequential: the host processes an
/// event, then reads the feedback, before the next event arrives.
pub trait Combiner {
    /// Inspect `event` (and, read-only, the events that preceded it) and
    /// return either `event` unchanged, [`Event::consumed`] when it went into
    /// the buffer, or a synthesized replacement.
    fn process_event(&mut self, history: &[Event], event: Event) -> Event;

    /// The text currently composed from the buffer. Pure: calling it twice
    /// without an intervening `process_event` returns the same string.
    fn combining_state_feedback(&self) -> String;

    /// Abandon the current composition.
    fn reset(&mut self);

    fn name(&self) -> &'static str;
}

impl<C: Combiner + ?Sized> Combiner for Box<C> {
    fn process_event(&mut self, history: &[Event], event: Event) -> Event {
        (**self).process_event(history, event)
    }

    fn combining_state_feedback(&self) -> String {
        (**self).combining_state_feedback()
    }

    fn reset(&mut self) {
        (**self).reset()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
