//! Declarative animation descriptors handed to the host's animation engine.
//!
//! Nothing in this crate interprets an [`AnimationDescriptor`] after building
//! it; the host renders each entry via its `Display` form, e.g.
//! `effect=zoom start=1 end=100 center=640,360 time=5000 tween=quadratic condition=true`.

use std::fmt;

/// When the host should run an animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Runs whenever the effect's condition holds; every effect here uses `condition=true`.
    Conditional,
}

impl Trigger {
    fn as_str(self) -> &'static str {
        match self {
            Self::Conditional => "conditional",
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tween {
    Linear,
    Quadratic,
    Circle,
}

impl fmt::Display for Tween {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Linear => "linear",
            Self::Quadratic => "quadratic",
            Self::Circle => "circle",
        })
    }
}

/// Pivot of a rotate/zoom effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Center {
    /// Centre of the slot itself.
    Auto,
    /// Absolute canvas point.
    Point(i32, i32),
}

impl fmt::Display for Center {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Point(x, y) => write!(f, "{x},{y}"),
        }
    }
}

/// The visual transformation of one animation entry. Percentages for fade and
/// zoom, degrees for rotations, canvas pixels for slide offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Fade { start: u32, end: u32 },
    Rotate { start: i32, end: i32 },
    RotateX { start: i32, end: i32 },
    Zoom { start: u32, end: u32 },
    Slide { start: (i32, i32), end: (i32, i32) },
}

impl Effect {
    fn name(&self) -> &'static str {
        match self {
            Self::Fade { .. } => "fade",
            Self::Rotate { .. } => "rotate",
            Self::RotateX { .. } => "rotatex",
            Self::Zoom { .. } => "zoom",
            Self::Slide { .. } => "slide",
        }
    }
}

/// One fully parameterised effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectSpec {
    pub effect: Effect,
    pub time_ms: u32,
    pub center: Option<Center>,
    pub delay_ms: Option<u32>,
    pub tween: Option<Tween>,
}

impl EffectSpec {
    #[must_use]
    pub const fn new(effect: Effect, time_ms: u32) -> Self {
        Self {
            effect,
            time_ms,
            center: None,
            delay_ms: None,
            tween: None,
        }
    }

    #[must_use]
    pub const fn center(mut self, center: Center) -> Self {
        self.center = Some(center);
        self
    }

    #[must_use]
    pub const fn delay(mut self, delay_ms: u32) -> Self {
        self.delay_ms = Some(delay_ms);
        self
    }

    #[must_use]
    pub const fn tween(mut self, tween: Tween) -> Self {
        self.tween = Some(tween);
        self
    }
}

impl fmt::Display for EffectSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "effect={}", self.effect.name())?;
        match self.effect {
            Effect::Fade { start, end } | Effect::Zoom { start, end } => {
                write!(f, " start={start} end={end}")?;
            }
            Effect::Rotate { start, end } | Effect::RotateX { start, end } => {
                write!(f, " start={start} end={end}")?;
            }
            Effect::Slide { start, end } => {
                write!(f, " start={},{} end={},{}", start.0, start.1, end.0, end.1)?;
            }
        }
        if let Some(center) = self.center {
            write!(f, " center={center}")?;
        }
        write!(f, " time={}", self.time_ms)?;
        if let Some(delay) = self.delay_ms {
            write!(f, " delay={delay}")?;
        }
        if let Some(tween) = self.tween {
            write!(f, " tween={tween}")?;
        }
        f.write_str(" condition=true")
    }
}

/// Ordered (trigger, effect) pairs attached to a slot. All entries run
/// concurrently once triggered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnimationDescriptor {
    entries: Vec<(Trigger, EffectSpec)>,
}

impl AnimationDescriptor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a conditional effect.
    #[must_use]
    pub fn with(mut self, spec: EffectSpec) -> Self {
        self.entries.push((Trigger::Conditional, spec));
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Trigger, EffectSpec)> {
        self.entries.iter()
    }

    /// Entries in the host's `(trigger, "effect=… condition=true")` string form.
    #[must_use]
    pub fn to_host_pairs(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .map(|(trigger, spec)| (trigger.to_string(), spec.to_string()))
            .collect()
    }
}
