use std::collections::VecDeque;
use std::fmt;

/// Discrete request for the run loop, polled once per frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Intent {
    Quit,
    IncreaseIpd,
    DecreaseIpd,
    ToggleStereoMode,
    ToggleTestPattern,
}

impl Intent {
    /// Whether holding the key should repeat the intent.
    #[inline]
    pub fn repeats(self) -> bool {
        matches!(self, Intent::IncreaseIpd | Intent::DecreaseIpd)
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Intent::Quit => "quit",
            Intent::IncreaseIpd => "increase IPD",
            Intent::DecreaseIpd => "decrease IPD",
            Intent::ToggleStereoMode => "toggle stereo mode",
            Intent::ToggleTestPattern => "toggle test pattern",
        };
        f.write_str(s)
    }
}

/// FIFO of intents collected between frames.
#[derive(Debug, Default)]
pub struct IntentQueue {
    pending: VecDeque<Intent>,
}

impl IntentQueue {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, intent: Intent) {
        self.pending.push_back(intent);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Removes and yields every pending intent in arrival order.
    pub fn drain(&mut self) -> impl Iterator<Item = Intent> + '_ {
        self.pending.drain(..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drains_in_arrival_order() {
        let mut q = IntentQueue::new();
        q.push(Intent::IncreaseIpd);
        q.push(Intent::ToggleStereoMode);
        q.push(Intent::Quit);
        assert_eq!(q.len(), 3);

        let drained: Vec<_> = q.drain().collect();
        assert_eq!(drained, vec![Intent::IncreaseIpd, Intent::ToggleStereoMode, Intent::Quit]);
        assert!(q.is_empty());
    }

    #[test]
    fn only_ipd_intents_repeat() {
        assert!(Intent::IncreaseIpd.repeats());
        assert!(Intent::DecreaseIpd.repeats());
        assert!(!Intent::Quit.repeats());
        assert!(!Intent::ToggleTestPattern.repeats());
    }
}
