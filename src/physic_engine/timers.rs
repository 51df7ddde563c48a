use generational_arena::{Arena, Index};

/// Poignée d'un minuteur planifié.
///
/// Les slots de l'arena sont générationnels : une poignée d'un minuteur
/// déjà tiré ou annulé ne peut jamais annuler un minuteur plus récent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(Index);

#[derive(Debug)]
struct Timer<E> {
    due: f64,
    seq: u64,
    event: E,
}

/// File de minuteurs coopérative (mono-thread), interrogée une fois par frame.
#[derive(Debug)]
pub struct TimerQueue<E> {
    timers: Arena<Timer<E>>,
    next_seq: u64,
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> TimerQueue<E> {
    pub fn new() -> Self {
        Self {
            timers: Arena::new(),
            next_seq: 0,
        }
    }

    /// Planifie `event` pour `now + delay`
    ///
    /// `now` est l'horloge hôte en `f64` : elle croît sans borne, les délais
    /// restent courts.
    pub fn schedule(&mut self, now: f64, delay: f32, event: E) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        TimerId(self.timers.insert(Timer {
            due: now + f64::from(delay.max(0.0)),
            seq,
            event,
        }))
    }

    /// Annule un minuteur. Retourne `false` s'il a déjà été tiré ou annulé.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.timers.remove(id.0).is_some()
    }

    /// Annule tout (démontage de la scène)
    pub fn cancel_all(&mut self) {
        self.timers.clear();
    }

    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.contains(id.0)
    }

    /// Échéance la plus proche
    pub fn next_due(&self) -> Option<f64> {
        self.timers
            .iter()
            .map(|(_, t)| t.due)
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Retire et retourne les événements échus à `now`, dans l'ordre
    /// d'échéance puis de planification.
    pub fn poll(&mut self, now: f64) -> Vec<E> {
        let mut due: Vec<(Index, f64, u64)> = self
            .timers
            .iter()
            .filter(|(_, t)| t.due <= now)
            .map(|(idx, t)| (idx, t.due, t.seq))
            .collect();
        due.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.2.cmp(&b.2)));

        due.into_iter()
            .filter_map(|(idx, _, _)| self.timers.remove(idx))
            .map(|t| t.event)
            .collect()
    }
}
