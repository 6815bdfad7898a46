//! Per-frame системы ядра анимации
//!
//! Порядок (chain, один раз за кадр):
//! 0. enforce_valid_config — только если RevolverConfig вставили/изменили
//! 1. detect_shots — EventEdgeDetector
//! 2. integrate_recoil — RecoilOscillator (integrate → impulse)
//! 3. tick_muzzle_flash — FlashController (tick → trigger)
//! 4. tick_smoke — ParticlePool (update → spawn)
//! 5. blend_part_poses — PoseBlender
//! 6. compose_revolver_pose — TransformComposer

pub mod tuning;
pub mod shots;
pub mod recoil;
pub mod effects;
pub mod pose;


// Re-export all systems
pub use tuning::*;
pub use shots::*;
pub use recoil::*;
pub use effects::*;
pub use pose::*;
