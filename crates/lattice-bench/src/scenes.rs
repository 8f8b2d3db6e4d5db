use glam::IVec3;
use lattice_core::constants::REGION_SIZE;
use lattice_core::rng::Lcg;

/// Workload shape for a single benchmark scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneKind {
    /// Create every slot in order, then destroy them all.
    FillAll,
    /// Random create/destroy mix over the whole region.
    SparseChurn { ops: u32, seed: u64 },
    /// Lookups through coordinates outside the region, half of them creating.
    WrappedLookup { lookups: u32, seed: u64 },
}

/// Configuration for a single benchmark scene.
pub struct SceneConfig {
    pub name: &'static str,
    pub kind: SceneKind,
}

/// Return the standard suite of benchmark scenes.
pub fn standard_scenes() -> Vec<SceneConfig> {
    vec![
        SceneConfig {
            name: "fill_all",
            kind: SceneKind::FillAll,
        },
        SceneConfig {
            name: "sparse_churn",
            kind: SceneKind::SparseChurn {
                ops: 50_000,
                seed: 42,
            },
        },
        SceneConfig {
            name: "wrapped_lookup",
            kind: SceneKind::WrappedLookup {
                lookups: 50_000,
                seed: 7,
            },
        },
    ]
}

/// One grid operation in a generated workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Get { coord: IVec3, create: bool },
    Destroy { coord: IVec3 },
}

/// Expand a scene into its operation list. Generated up front so timing
/// covers only grid work.
pub fn generate_ops(kind: SceneKind) -> Vec<Op> {
    let s = REGION_SIZE as i32;
    match kind {
        SceneKind::FillAll => {
            let mut ops = Vec::with_capacity((s * s * s * 2) as usize);
            for x in 0..s {
                for y in 0..s {
                    for z in 0..s {
                        ops.push(Op::Get {
                            coord: IVec3::new(x, y, z),
                            create: true,
                        });
                    }
                }
            }
            let destroys: Vec<Op> = ops
                .iter()
                .map(|op| match *op {
                    Op::Get { coord, .. } => Op::Destroy { coord },
                    other => other,
                })
                .collect();
            ops.extend(destroys);
            ops
        }
        SceneKind::SparseChurn { ops, seed } => {
            let mut rng = Lcg::new(seed);
            (0..ops)
                .map(|_| {
                    let r = rng.next_u32();
                    let coord = IVec3::new(
                        (r % REGION_SIZE) as i32,
                        ((r >> 4) % REGION_SIZE) as i32,
                        ((r >> 8) % REGION_SIZE) as i32,
                    );
                    // Roughly 60% creates so the grid fills partway.
                    if (r >> 12) % 10 < 6 {
                        Op::Get {
                            coord,
                            create: true,
                        }
                    } else {
                        Op::Destroy { coord }
                    }
                })
                .collect()
        }
        SceneKind::WrappedLookup { lookups, seed } => {
            let mut rng = Lcg::new(seed);
            (0..lookups)
                .map(|_| {
                    let r = rng.next_u32();
                    // Spread over several regions' worth of coordinates, both signs.
                    let span = (s * 8) as u32;
                    let coord = IVec3::new(
                        (r % span) as i32 - s * 4,
                        ((r >> 7) % span) as i32 - s * 4,
                        ((r >> 14) % span) as i32 - s * 4,
                    );
                    Op::Get {
                        coord,
                        create: (r >> 21) & 1 == 1,
                    }
                })
                .collect()
        }
    }
}
