use crate::math::{Isometry, Point, Real, Translation};
use crate::query::split::{section_loops, CutError, CutJob, CutResult, CutStats};
use crate::session::{
    CancelReason, CutCommand, CutMode, CutPhase, CutSession, CutterConfig, Hand, InputAdapter,
    MeshHost, MeshId, Mobility, SessionError, SpatialQuery,
};
use crate::shape::{CutPath, CutPlane};
use na::UnitQuaternion;
use slab::Slab;

/// What happened in response to a command or a tick.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    /// The command had no effect.
    Ignored,
    /// The command was refused; no session was created or modified.
    Rejected {
        /// The hand that issued the command.
        hand: Hand,
        /// Why the command was refused.
        error: SessionError,
    },
    /// A session started.
    Began {
        /// The hand driving the session.
        hand: Hand,
        /// The mesh being cut.
        target: MeshId,
    },
    /// A blade pose was recorded.
    Updated {
        /// The hand driving the session.
        hand: Hand,
        /// The number of samples of the session.
        samples: usize,
        /// Did the pose change the path? Poses too close to the previous sample are dropped.
        sample_added: bool,
    },
    /// The blade of a hand rolled.
    BladeRolled {
        /// The hand holding the blade.
        hand: Hand,
        /// The new blade roll, in radians.
        roll: Real,
    },
    /// The gesture ended and the cut will complete over the next ticks.
    Committing {
        /// The hand driving the session.
        hand: Hand,
        /// The mesh being cut.
        target: MeshId,
    },
    /// The pieces of the cut were handed to the host.
    Committed {
        /// The hand that drove the session.
        hand: Hand,
        /// The mesh replaced by the pieces.
        target: MeshId,
        /// Counters describing the cut.
        stats: CutStats,
    },
    /// The session ended without touching its target.
    Cancelled {
        /// The hand that drove the session.
        hand: Hand,
        /// The mesh that was targeted.
        target: MeshId,
        /// Why the session ended.
        reason: CancelReason,
    },
}

/// Drives cut sessions from controller input.
///
/// At most one session runs per hand, and at most one session targets a given mesh. The
/// controller never modifies the meshes of the host: cuts work on a copy of the target, and
/// the host only sees the result through [`MeshHost::apply_cut`], once the cut is complete.
pub struct CutSessionController<H, Q, A> {
    host: H,
    query: Q,
    input: A,
    config: CutterConfig,
    sessions: Slab<CutSession>,
    by_hand: [Option<usize>; 2],
    blade_roll: [Real; 2],
}

impl<H, Q, A> CutSessionController<H, Q, A> {
    /// A controller without any session.
    pub fn new(host: H, query: Q, input: A, config: CutterConfig) -> Self {
        Self {
            host,
            query,
            input,
            config,
            sessions: Slab::new(),
            by_hand: [None; 2],
            blade_roll: [0.0; 2],
        }
    }

    /// The configuration of this controller.
    pub fn config(&self) -> &CutterConfig {
        &self.config
    }

    /// Mutable access to the configuration of this controller.
    ///
    /// Changes apply to the next samples and commits, including those of running sessions.
    pub fn config_mut(&mut self) -> &mut CutterConfig {
        &mut self.config
    }

    /// The host receiving the cuts.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host receiving the cuts.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The spatial query used to pick targets.
    pub fn query(&self) -> &Q {
        &self.query
    }

    /// The input adapter.
    pub fn input(&self) -> &A {
        &self.input
    }

    /// Mutable access to the input adapter.
    pub fn input_mut(&mut self) -> &mut A {
        &mut self.input
    }

    /// The session driven by `hand`, if any.
    pub fn session(&self, hand: Hand) -> Option<&CutSession> {
        self.by_hand[hand.index()].map(|key| &self.sessions[key])
    }

    /// The phase of the session driven by `hand`.
    pub fn phase(&self, hand: Hand) -> CutPhase {
        self.session(hand).map_or(CutPhase::Idle, |s| s.phase())
    }

    /// The number of running sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Is a session cutting the mesh `id`?
    pub fn is_locked(&self, id: MeshId) -> bool {
        self.sessions.iter().any(|(_, s)| s.target == id)
    }

    /// The roll of the blade of `hand`, in radians.
    pub fn blade_roll(&self, hand: Hand) -> Real {
        self.blade_roll[hand.index()]
    }

    /// The world-space pose of the blade of `hand` held at `controller_pose`.
    pub fn blade_pose(&self, hand: Hand, controller_pose: &Isometry<Real>) -> Isometry<Real> {
        let roll =
            UnitQuaternion::from_axis_angle(&self.config.blade_roll_axis, self.blade_roll(hand));
        controller_pose * Isometry::from_parts(Translation::from(self.config.blade_offset), roll)
    }

    /// The world-space cutting plane of the blade of `hand` held at `controller_pose`.
    pub fn blade_plane(&self, hand: Hand, controller_pose: &Isometry<Real>) -> CutPlane {
        CutPlane::from_pose(
            &self.blade_pose(hand, controller_pose),
            &Point::origin(),
            &self.config.blade_normal,
        )
    }

    fn active_session(&self, hand: Hand) -> Option<usize> {
        self.by_hand[hand.index()].filter(|key| self.sessions[*key].phase == CutPhase::Active)
    }

    /// Records the blade plane at `pose` in the path of a session.
    fn record_sample(&mut self, key: usize, pose: &Isometry<Real>) -> bool {
        let plane = self.blade_plane(self.sessions[key].hand, pose);
        let config = &self.config;
        let path = &mut self.sessions[key].path;

        match config.mode {
            CutMode::Planar => {
                path.replace_last(plane);
                true
            }
            CutMode::Swept if path.len() >= config.max_samples => {
                let is_close = path.last().is_some_and(|last| {
                    last.is_close_to(&plane, config.sample_min_angle, config.sample_min_distance)
                });
                if !is_close {
                    path.replace_last(plane);
                }
                !is_close
            }
            CutMode::Swept => {
                path.push_if_distinct(plane, config.sample_min_angle, config.sample_min_distance)
            }
        }
    }
}

impl<H: MeshHost, Q: SpatialQuery, A: InputAdapter> CutSessionController<H, Q, A> {
    /// Translates a host input event and executes the resulting command.
    pub fn on_input(&mut self, event: A::Event) -> SessionEvent {
        match self.input.translate(event) {
            Some(command) => self.execute(command),
            None => SessionEvent::Ignored,
        }
    }
}

impl<H: MeshHost, Q: SpatialQuery, A> CutSessionController<H, Q, A> {
    /// Executes a command.
    pub fn execute(&mut self, command: CutCommand) -> SessionEvent {
        match command {
            CutCommand::Begin { hand, pose } => self.begin(hand, &pose),
            CutCommand::Update { hand, pose } => self.update(hand, &pose),
            CutCommand::Commit { hand, pose } => self.commit(hand, pose.as_ref()),
            CutCommand::Cancel { hand } => match self.by_hand[hand.index()] {
                Some(key) => self.cancel(key, CancelReason::Requested),
                None => SessionEvent::Ignored,
            },
            CutCommand::RollBlade { hand, angle } => {
                let roll = &mut self.blade_roll[hand.index()];
                *roll = (*roll + angle).rem_euclid(core::f32::consts::TAU);
                SessionEvent::BladeRolled { hand, roll: *roll }
            }
            CutCommand::ResetBlade { hand } => {
                self.blade_roll[hand.index()] = 0.0;
                SessionEvent::BladeRolled { hand, roll: 0.0 }
            }
        }
    }

    /// Advances the cuts being committed over several frames.
    ///
    /// Each committing session processes at most
    /// [`CutterConfig::triangles_per_tick`] source triangles.
    pub fn tick(&mut self) -> Vec<SessionEvent> {
        let budget = self
            .config
            .triangles_per_tick
            .map_or(usize::MAX, |n| n.max(1));
        let committing: Vec<_> = self
            .sessions
            .iter()
            .filter(|(_, s)| s.phase == CutPhase::Committing)
            .map(|(key, _)| key)
            .collect();
        let mut events = vec![];

        for key in committing {
            if !self.is_target_current(key) {
                events.push(self.cancel(key, CancelReason::InvalidTarget));
                continue;
            }

            let finished = self.sessions[key]
                .job
                .as_mut()
                .and_then(|job| job.step(budget));

            if let Some(result) = finished {
                events.push(self.finish(key, result));
            }
        }

        events
    }

    /// Cancels every session, leaving every target untouched.
    pub fn cancel_all(&mut self) -> Vec<SessionEvent> {
        let keys: Vec<_> = self.sessions.iter().map(|(key, _)| key).collect();
        keys.into_iter()
            .map(|key| self.cancel(key, CancelReason::Teardown))
            .collect()
    }

    /// The world-space section of the target of `hand` by its latest blade sample.
    ///
    /// This is meant for visual feedback only. Returns `None` if `hand` has no session or if
    /// its target no longer exists, and no loop if the blade misses the target.
    pub fn preview(&self, hand: Hand) -> Option<Vec<Vec<Point<Real>>>> {
        let session = self.session(hand)?;
        let target = self.host.target(session.target)?;
        let plane = session
            .path
            .last()?
            .inverse_transform_by(&target.world_from_mesh);
        let loops = section_loops(target.mesh, &plane, self.config.options.epsilon)
            .unwrap_or_default();

        Some(
            loops
                .into_iter()
                .map(|points| {
                    points
                        .into_iter()
                        .map(|pt| target.world_from_mesh * pt)
                        .collect()
                })
                .collect(),
        )
    }

    fn begin(&mut self, hand: Hand, pose: &Isometry<Real>) -> SessionEvent {
        let rejected = |error: SessionError| {
            log::debug!("{:?} hand cannot begin a cut: {}", hand, error);
            SessionEvent::Rejected { hand, error }
        };

        if self.by_hand[hand.index()].is_some() {
            return rejected(SessionError::SessionInProgress);
        }

        let Some(id) = self.query.target_at(&self.blade_pose(hand, pose)) else {
            return rejected(SessionError::NoTarget);
        };

        if self.is_locked(id) {
            return rejected(SessionError::TargetBusy);
        }

        match self.host.target(id) {
            None => return rejected(SessionError::InvalidTarget),
            Some(target) if target.mobility == Mobility::Static => {
                return rejected(SessionError::ImmovableTarget)
            }
            Some(_) => {}
        }

        let path = CutPath::single(self.blade_plane(hand, pose));
        let key = self.sessions.insert(CutSession::new(id, hand, path));
        self.by_hand[hand.index()] = Some(key);
        log::debug!("{:?} hand began cutting {:?}", hand, id);

        SessionEvent::Began { hand, target: id }
    }

    fn update(&mut self, hand: Hand, pose: &Isometry<Real>) -> SessionEvent {
        let Some(key) = self.active_session(hand) else {
            return SessionEvent::Ignored;
        };

        if self.host.target(self.sessions[key].target).is_none() {
            return self.cancel(key, CancelReason::InvalidTarget);
        }

        let sample_added = self.record_sample(key, pose);
        SessionEvent::Updated {
            hand,
            samples: self.sessions[key].path.len(),
            sample_added,
        }
    }

    fn commit(&mut self, hand: Hand, pose: Option<&Isometry<Real>>) -> SessionEvent {
        let Some(key) = self.active_session(hand) else {
            return SessionEvent::Ignored;
        };

        if let Some(pose) = pose {
            let _ = self.record_sample(key, pose);
        }

        let id = self.sessions[key].target;
        let job = match self.host.target(id) {
            Some(target) => {
                let local = self.sessions[key]
                    .path
                    .inverse_transformed(&target.world_from_mesh);
                let planes = match self.config.mode {
                    CutMode::Planar => local.last().copied().into_iter().collect(),
                    CutMode::Swept => local.samples().to_vec(),
                };
                CutJob::new(target.mesh.clone(), planes, &self.config.options)
            }
            None => return self.cancel(key, CancelReason::InvalidTarget),
        };

        if self.config.triangles_per_tick.is_none() {
            return self.finish(key, job.run());
        }

        let session = &mut self.sessions[key];
        session.job = Some(job);
        session.set_phase(CutPhase::Committing);
        SessionEvent::Committing { hand, target: id }
    }

    fn finish(&mut self, key: usize, result: Result<CutResult, CutError>) -> SessionEvent {
        let result = match result {
            Ok(result) => result,
            Err(err) => return self.cancel(key, CancelReason::Cut(err)),
        };

        if !self.is_target_current(key) {
            return self.cancel(key, CancelReason::InvalidTarget);
        }

        let mut session = self.sessions.remove(key);
        self.by_hand[session.hand.index()] = None;
        session.set_phase(CutPhase::Committed);

        let stats = result.stats;
        log::debug!(
            "{:?} cut into {} piece(s) by the {:?} hand",
            session.target,
            result.pieces.len(),
            session.hand
        );
        self.host.apply_cut(session.target, result);

        SessionEvent::Committed {
            hand: session.hand,
            target: session.target,
            stats,
        }
    }

    /// Does the target of a session still exist, unchanged since its cut started?
    fn is_target_current(&self, key: usize) -> bool {
        let session = &self.sessions[key];
        match (self.host.target(session.target), &session.job) {
            (Some(target), Some(job)) => target.mesh == job.source(),
            (Some(_), None) => true,
            (None, _) => false,
        }
    }

    fn cancel(&mut self, key: usize, reason: CancelReason) -> SessionEvent {
        let mut session = self.sessions.remove(key);
        self.by_hand[session.hand.index()] = None;
        session.set_phase(CutPhase::Cancelled);
        log::debug!(
            "{:?} hand stopped cutting {:?}: {:?}",
            session.hand,
            session.target,
            reason
        );

        SessionEvent::Cancelled {
            hand: session.hand,
            target: session.target,
            reason,
        }
    }
}
