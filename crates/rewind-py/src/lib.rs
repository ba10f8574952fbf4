//! # Rewind Python Bindings
//!
//! PyO3 bindings exposing the rewind duel simulation to Python, e.g. for
//! training agents against the frame-stepped core.
//!
//! ## Usage
//!
//! ```python
//! from rewind import Duel
//!
//! duel = Duel(cooldown_secs=3.0)
//!
//! # (walk_left, walk_right, attack, rewind) per player
//! outcome = duel.step((False, True, False, False), (True, False, False, False), 1 / 60)
//! if outcome is not None:
//!     print(outcome, duel.scores)
//!
//! obs = duel.observe()          # numpy float32 array
//! left = duel.combatant("left")
//! print(left.head, left.state, left.palette)
//! ```

use numpy::{PyArray1, ToPyArray};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use rewind_core::combatant::Combatant;
use rewind_core::{
    ConfigOverrides, Controls, DuelConfig, FrameInput, HitRule, RoundController, Side,
};

/// Number of values per combatant in [`PyDuel::observe`].
const OBS_PER_SIDE: usize = 8;

/// Walk-left, walk-right, attack, rewind.
type ControlTuple = (bool, bool, bool, bool);

fn controls(t: ControlTuple) -> Controls {
    Controls::from_bools(t.0, t.1, t.2, t.3)
}

fn parse_side(side: &str) -> PyResult<Side> {
    match side.to_lowercase().as_str() {
        "left" | "l" => Ok(Side::Left),
        "right" | "r" => Ok(Side::Right),
        other => Err(PyValueError::new_err(format!(
            "unknown side {other:?}, expected \"left\" or \"right\""
        ))),
    }
}

fn parse_hit_rule(rule: &str) -> PyResult<HitRule> {
    match rule.to_lowercase().as_str() {
        "reach" => Ok(HitRule::Reach),
        "overlap" => Ok(HitRule::Overlap),
        other => Err(PyValueError::new_err(format!(
            "unknown hit rule {other:?}, expected \"reach\" or \"overlap\""
        ))),
    }
}

fn state_name(c: &Combatant) -> &'static str {
    if c.is_rewinding() {
        "rewinding"
    } else if c.is_cooling() {
        "cooling"
    } else {
        "normal"
    }
}

/// A duel between two combatants, stepped one frame at a time.
#[pyclass(name = "Duel")]
pub struct PyDuel {
    inner: RoundController,
}

#[pymethods]
impl PyDuel {
    /// Create a duel from the defaults, or from `config_json` when given.
    ///
    /// Every keyword that is set replaces the matching setting, with or
    /// without `config_json`. `history_capacity=0` keeps the entire history.
    #[new]
    #[pyo3(signature = (
        walk_speed=None,
        max_rewind_secs=None,
        cooldown_secs=None,
        rewind_speedup=None,
        history_capacity=None,
        hit_rule=None,
        config_json=None,
    ))]
    fn new(
        walk_speed: Option<f32>,
        max_rewind_secs: Option<f32>,
        cooldown_secs: Option<f32>,
        rewind_speedup: Option<u32>,
        history_capacity: Option<usize>,
        hit_rule: Option<&str>,
        config_json: Option<&str>,
    ) -> PyResult<Self> {
        let base = match config_json {
            Some(json) => serde_json::from_str::<DuelConfig>(json)
                .map_err(|e| PyValueError::new_err(format!("invalid config json: {e}")))?,
            None => DuelConfig::default(),
        };
        let overrides = ConfigOverrides {
            walk_speed,
            max_rewind_secs,
            cooldown_secs,
            rewind_speedup,
            history_capacity: history_capacity.map(|cap| (cap > 0).then_some(cap)),
            hit_rule: hit_rule.map(parse_hit_rule).transpose()?,
        };

        let inner = RoundController::new(overrides.apply(base))
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Apply both players' controls and advance one frame.
    ///
    /// Returns a description of the round outcome, or `None` if the round
    /// continues.
    fn step(&mut self, left: ControlTuple, right: ControlTuple, elapsed: f32) -> Option<String> {
        let input = FrameInput::new(controls(left), controls(right));
        self.inner
            .step(&input, elapsed)
            .map(|outcome| outcome.to_string())
    }

    /// Scores as `(left, right)`.
    #[getter]
    fn scores(&self) -> (u32, u32) {
        let score = self.inner.score();
        (score.left, score.right)
    }

    /// Frames simulated since the match began.
    #[getter]
    fn frame(&self) -> u64 {
        self.inner.frame()
    }

    /// Rounds decided since the match began.
    #[getter]
    fn round(&self) -> u32 {
        self.inner.round()
    }

    /// Hash of the full simulation state.
    #[getter]
    fn state_hash(&self) -> u64 {
        self.inner.state_hash()
    }

    /// Flat observation vector.
    ///
    /// Per side (left, then right): head x, head y, sword angle, attacking,
    /// state code (0 normal, 1 rewinding, 2 cooling), rewound seconds,
    /// cooldown seconds, history length. Then the left and right scores.
    fn observe<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f32>> {
        let mut obs = Vec::with_capacity(2 * OBS_PER_SIDE + 2);
        for c in self.inner.combatants() {
            #[allow(clippy::cast_precision_loss)]
            obs.extend_from_slice(&[
                c.head().x,
                c.head().y,
                c.sword_angle(),
                f32::from(u8::from(c.is_attacking())),
                f32::from(c.state().code()),
                c.rewound_secs(),
                c.cooldown_secs(),
                c.history().len() as f32,
            ]);
        }
        let score = self.inner.score();
        #[allow(clippy::cast_precision_loss)]
        obs.extend_from_slice(&[score.left as f32, score.right as f32]);
        obs.to_pyarray(py)
    }

    /// Snapshot of one combatant.
    fn combatant(&self, side: &str) -> PyResult<PyCombatantState> {
        let side = parse_side(side)?;
        Ok(PyCombatantState::from(self.inner.combatant(side)))
    }

    /// Start a new match with zero scores.
    fn reset(&mut self) {
        self.inner.reset_match();
    }

    /// Drain pending events as human-readable strings.
    fn take_events(&mut self) -> Vec<String> {
        self.inner
            .take_events()
            .into_iter()
            .map(|e| format!("[{}] {}", e.frame, e.event))
            .collect()
    }

    /// The active configuration as JSON.
    fn config_json(&self) -> PyResult<String> {
        serde_json::to_string(self.inner.config()).map_err(|e| PyValueError::new_err(e.to_string()))
    }

    fn __repr__(&self) -> String {
        let score = self.inner.score();
        format!(
            "Duel(frame={}, round={}, score={}-{})",
            self.inner.frame(),
            self.inner.round(),
            score.left,
            score.right
        )
    }
}

/// Read-only view of one combatant at the time it was taken.
#[pyclass(name = "CombatantState", frozen)]
#[derive(Clone)]
pub struct PyCombatantState {
    #[pyo3(get)]
    pub side: String,
    #[pyo3(get)]
    pub head: (f32, f32),
    #[pyo3(get)]
    pub sword_angle: f32,
    #[pyo3(get)]
    pub attacking: bool,
    #[pyo3(get)]
    pub state: String,
    #[pyo3(get)]
    pub rewound_secs: f32,
    #[pyo3(get)]
    pub cooldown_secs: f32,
    #[pyo3(get)]
    pub history_len: usize,
    #[pyo3(get)]
    pub palette: String,
    #[pyo3(get)]
    pub tint: (u8, u8, u8, u8),
}

impl From<&Combatant> for PyCombatantState {
    fn from(c: &Combatant) -> Self {
        let [r, g, b, a] = c.palette().tint(c.side()).0;
        Self {
            side: c.side().to_string(),
            head: (c.head().x, c.head().y),
            sword_angle: c.sword_angle(),
            attacking: c.is_attacking(),
            state: state_name(c).to_string(),
            rewound_secs: c.rewound_secs(),
            cooldown_secs: c.cooldown_secs(),
            history_len: c.history().len(),
            palette: format!("{:?}", c.palette()).to_lowercase(),
            tint: (r, g, b, a),
        }
    }
}

#[pymethods]
impl PyCombatantState {
    fn __repr__(&self) -> String {
        format!(
            "CombatantState(side={}, head=({:.2}, {:.2}), angle={:.1}, state={})",
            self.side, self.head.0, self.head.1, self.sword_angle, self.state
        )
    }
}

/// Python module definition.
#[pymodule]
fn _rewind(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyDuel>()?;
    m.add_class::<PyCombatantState>()?;
    Ok(())
}
