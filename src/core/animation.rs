//! Composed expand/collapse animation: several integer properties interpolated together.

use std::time::{Duration, Instant};

pub const MAX_ALPHA: u8 = 255;
pub const MIN_ALPHA: u8 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimatedProperty {
    /// Visible height in rows.
    Height,
    /// Fade overlay opacity.
    Alpha,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tween {
    pub from: i32,
    pub to: i32,
}

impl Tween {
    pub fn new(from: i32, to: i32) -> Self {
        Self { from, to }
    }

    pub fn at(&self, fraction: f32) -> i32 {
        let fraction = fraction.clamp(0.0, 1.0);
        let delta = (self.to - self.from) as f32 * fraction;
        self.from + delta.round() as i32
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnimationSet {
    tweens: Vec<(AnimatedProperty, Tween)>,
    start: Instant,
    duration: Duration,
    cancelled: bool,
}

impl AnimationSet {
    pub fn new(start: Instant, duration: Duration) -> Self {
        Self {
            tweens: Vec::new(),
            start,
            duration,
            cancelled: false,
        }
    }

    /// Adds a tween that runs in parallel with the others.
    pub fn play_together(mut self, property: AnimatedProperty, tween: Tween) -> Self {
        self.tweens.retain(|(existing, _)| *existing != property);
        self.tweens.push((property, tween));
        self
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn fraction(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    pub fn value(&self, property: AnimatedProperty, now: Instant) -> Option<i32> {
        let fraction = self.fraction(now);
        self.tweens
            .iter()
            .find(|(candidate, _)| *candidate == property)
            .map(|(_, tween)| tween.at(fraction))
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.cancelled || self.fraction(now) >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::{AnimatedProperty, AnimationSet, Tween, MAX_ALPHA, MIN_ALPHA};
    use std::time::{Duration, Instant};

    fn expand_animation(start: Instant) -> AnimationSet {
        AnimationSet::new(start, Duration::from_millis(300))
            .play_together(AnimatedProperty::Height, Tween::new(2, 10))
            .play_together(
                AnimatedProperty::Alpha,
                Tween::new(MAX_ALPHA as i32, MIN_ALPHA as i32),
            )
    }

    #[test]
    fn properties_interpolate_in_parallel() {
        let start = Instant::now();
        let animation = expand_animation(start);
        let quarter = start + Duration::from_millis(75);
        let halfway = start + Duration::from_millis(150);

        assert_eq!(animation.value(AnimatedProperty::Height, start), Some(2));
        assert_eq!(animation.value(AnimatedProperty::Height, halfway), Some(6));
        assert_eq!(animation.value(AnimatedProperty::Alpha, quarter), Some(191));
        assert!(!animation.is_finished(halfway));
    }

    #[test]
    fn values_hold_at_the_end() {
        let start = Instant::now();
        let animation = expand_animation(start);
        let late = start + Duration::from_secs(5);

        assert_eq!(animation.value(AnimatedProperty::Height, late), Some(10));
        assert_eq!(animation.value(AnimatedProperty::Alpha, late), Some(0));
        assert!(animation.is_finished(late));
    }

    #[test]
    fn cancel_finishes_immediately() {
        let start = Instant::now();
        let mut animation = expand_animation(start);
        animation.cancel();
        assert!(animation.is_finished(start));
        assert!(animation.is_cancelled());
    }

    #[test]
    fn zero_duration_jumps_to_the_end() {
        let start = Instant::now();
        let animation = AnimationSet::new(start, Duration::ZERO)
            .play_together(AnimatedProperty::Height, Tween::new(1, 4));
        assert_eq!(animation.value(AnimatedProperty::Height, start), Some(4));
    }
}
