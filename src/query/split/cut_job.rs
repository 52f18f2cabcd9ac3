use crate::math::{Real, Vector};
use crate::query::split::{CutError, CutOptions, CutResult, CutStats, MeshPiece, MeshSplitter};
use crate::shape::{CutPath, CutPlane, Mesh};
use alloc::collections::VecDeque;
use alloc::sync::Arc;

struct PendingPiece {
    mesh: Arc<Mesh>,
    cap_start: usize,
    separation: Vector<Real>,
}

impl PendingPiece {
    fn from_split(piece: MeshPiece, parent_separation: Vector<Real>) -> Self {
        Self {
            mesh: Arc::new(piece.mesh),
            cap_start: piece.cap_start,
            separation: parent_separation + piece.separation,
        }
    }

    fn into_piece(self) -> MeshPiece {
        MeshPiece {
            mesh: Arc::try_unwrap(self.mesh).unwrap_or_else(|shared| (*shared).clone()),
            cap_start: self.cap_start,
            separation: self.separation,
        }
    }
}

struct ActiveSplit {
    splitter: MeshSplitter<Arc<Mesh>>,
    parent: PendingPiece,
}

/// Applies a sequence of cutting planes to a mesh, possibly over several frames.
///
/// Each plane is applied, in order, to every piece produced so far. Pieces a plane does not
/// cross, or cannot split into two non-empty pieces, are kept as they are. Cap triangles
/// created by earlier planes stay in the cap section of the pieces produced by later ones.
pub struct CutJob {
    source: Arc<Mesh>,
    planes: Vec<CutPlane>,
    options: CutOptions,
    plane_id: usize,
    pending: VecDeque<PendingPiece>,
    processed: Vec<PendingPiece>,
    active: Option<ActiveSplit>,
    stats: CutStats,
    finished: bool,
}

impl CutJob {
    /// Prepares the cut of `mesh` by every plane of `planes`, in order.
    ///
    /// No work is done until [`CutJob::step`] or [`CutJob::run`] is called.
    pub fn new(mesh: Mesh, planes: impl IntoIterator<Item = CutPlane>, options: &CutOptions) -> Self {
        let stats = CutStats {
            source_triangles: mesh.triangle_count(),
            ..CutStats::default()
        };
        let source = Arc::new(mesh);
        let piece = PendingPiece {
            cap_start: source.triangle_count(),
            mesh: Arc::clone(&source),
            separation: Vector::zeros(),
        };

        Self {
            source,
            planes: planes.into_iter().collect(),
            options: *options,
            plane_id: 0,
            pending: VecDeque::from([piece]),
            processed: vec![],
            active: None,
            stats,
            finished: false,
        }
    }

    /// The mesh this job cuts, as it was when the job was created.
    pub fn source(&self) -> &Mesh {
        &self.source
    }

    /// The planes applied by this job.
    pub fn planes(&self) -> &[CutPlane] {
        &self.planes
    }

    /// The number of planes already applied to every piece.
    pub fn completed_planes(&self) -> usize {
        self.plane_id
    }

    /// Has this job already returned its result?
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advances the job by at most `budget` source triangles.
    ///
    /// Classifying a piece against a plane is not counted in the budget: starting the split of
    /// a piece always walks all of its vertices and triangles once. Returns `None` while
    /// the job is in progress and once it has already returned its result.
    ///
    /// # Errors
    ///
    /// The result is [`CutError::NoIntersection`] if no plane split anything, and
    /// [`CutError::MalformedMesh`] if the mesh is invalid.
    pub fn step(&mut self, mut budget: usize) -> Option<Result<CutResult, CutError>> {
        if self.finished {
            return None;
        }

        let result = self.advance(&mut budget);
        if result.is_some() {
            self.finished = true;
        }
        result
    }

    /// Runs the whole job at once.
    pub fn run(mut self) -> Result<CutResult, CutError> {
        let mut budget = usize::MAX;
        loop {
            if let Some(result) = self.advance(&mut budget) {
                return result;
            }
            budget = usize::MAX;
        }
    }

    fn advance(&mut self, budget: &mut usize) -> Option<Result<CutResult, CutError>> {
        loop {
            let Some(plane) = self.planes.get(self.plane_id).copied() else {
                return Some(self.collect_pieces());
            };

            if let Some(active) = &mut self.active {
                let work = active.splitter.remaining().min(*budget);
                if !active.splitter.step(work) {
                    return None;
                }
                *budget -= work;

                if let Some(active) = self.active.take() {
                    if let Err(err) = self.finish_split(active) {
                        return Some(Err(err));
                    }
                }
                continue;
            }

            if let Some(piece) = self.pending.pop_front() {
                match MeshSplitter::new(Arc::clone(&piece.mesh), &plane, &self.options) {
                    Ok(splitter) => {
                        self.active = Some(ActiveSplit {
                            splitter: splitter.with_cap_start(piece.cap_start),
                            parent: piece,
                        });
                    }
                    Err(CutError::NoIntersection) => self.processed.push(piece),
                    Err(err) => return Some(Err(err)),
                }
                continue;
            }

            // Every piece went through the current plane.
            self.plane_id += 1;
            self.stats.planes += 1;
            self.pending.extend(self.processed.drain(..));
        }
    }

    fn finish_split(&mut self, active: ActiveSplit) -> Result<(), CutError> {
        match active.splitter.finish() {
            Ok(out) => {
                self.stats.splits += 1;
                self.stats.cap_triangles += out.stats.cap_triangles;
                self.stats.discarded_loops += out.stats.discarded_loops;

                let separation = active.parent.separation;
                self.processed
                    .push(PendingPiece::from_split(out.front, separation));
                self.processed
                    .push(PendingPiece::from_split(out.back, separation));
                Ok(())
            }
            Err(CutError::DegenerateCut {
                front_triangles,
                back_triangles,
            }) => {
                log::debug!(
                    "keeping a piece the plane cannot split ({} front, {} back triangle(s))",
                    front_triangles,
                    back_triangles
                );
                self.processed.push(active.parent);
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    fn collect_pieces(&mut self) -> Result<CutResult, CutError> {
        if self.stats.splits == 0 {
            log::debug!("none of the {} plane(s) split the mesh", self.planes.len());
            return Err(CutError::NoIntersection);
        }

        let pieces: Vec<_> = self
            .pending
            .drain(..)
            .chain(self.processed.drain(..))
            .map(PendingPiece::into_piece)
            .collect();

        self.stats.output_triangles = pieces.iter().map(|p| p.mesh.triangle_count()).sum();
        log::debug!(
            "cut {} triangle(s) with {} plane(s) into {} piece(s)",
            self.stats.source_triangles,
            self.stats.planes,
            pieces.len()
        );

        Ok(CutResult {
            pieces,
            stats: self.stats,
        })
    }
}

/// Cuts `mesh` along every sample of `path` and returns the resulting pieces.
///
/// # Errors
///
/// Fails with [`CutError::NoIntersection`] if no sample of the path splits the mesh.
pub fn cut_mesh(mesh: &Mesh, path: &CutPath, options: &CutOptions) -> Result<CutResult, CutError> {
    CutJob::new(mesh.clone(), path.samples().iter().copied(), options).run()
}
