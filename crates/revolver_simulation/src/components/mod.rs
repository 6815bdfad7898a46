//! ECS Components ядра анимации
//!
//! Организация:
//! - input: FireEvent (level-triggered input от game-state owner'а, read-only)
//! - shot: ShotTracker (edge detector rotation_step → Fired/Resynced)
//! - recoil: RecoilSpring (damped spring отдачи)
//! - flash: MuzzleFlash (таймер вспышки + трассер)
//! - smoke: SmokePool (фиксированный pool клубов дыма)
//! - pose: PartPose (сглаженные углы), RevolverPose (финальный output), CartridgeView
//! - revolver: Revolver marker + revolver_bundle

pub mod input;
pub mod shot;
pub mod recoil;
pub mod flash;
pub mod smoke;
pub mod pose;
pub mod revolver;


// Re-exports для удобного импорта
pub use input::*;
pub use shot::*;
pub use recoil::*;
pub use flash::*;
pub use smoke::*;
pub use pose::*;
pub use revolver::*;
