//! Headless demo ядра анимации
//!
//! Играет роль внешнего game-state owner'а: шесть нажатий спуска,
//! осечка на пустой каморе, затем открыть → перезарядить → закрыть.
//! Позы пишутся в лог (рендера нет).

use std::time::Duration;

use revolver_simulation::{
    create_fixed_step_app, log_info, revolver_bundle, FireEvent, RevolverConfig, RevolverFrame,
    CHAMBER_COUNT,
};

const FRAME: Duration = Duration::from_millis(16);

/// Что делает владелец на данном кадре
enum OwnerAction {
    PullTrigger,
    OpenForReload,
    FinishReload,
}

fn scripted_action(tick: usize) -> Option<OwnerAction> {
    match tick {
        // 7 нажатий с интервалом 0.5s: 6 выстрелов + осечка
        t if t > 0 && t % 30 == 0 && t <= 210 => Some(OwnerAction::PullTrigger),
        270 => Some(OwnerAction::OpenForReload),
        420 => Some(OwnerAction::FinishReload),
        _ => None,
    }
}

fn apply(input: &mut FireEvent, action: OwnerAction) {
    match action {
        OwnerAction::PullTrigger => {
            if input.is_reloading || input.is_cylinder_open {
                return;
            }
            let next_step = input.rotation_step + 1;
            input.rotation_step = next_step;

            let chamber = input.chamber_under_hammer();
            let live = input.chambers[chamber];
            input.last_shot_live = live;

            if live {
                // Стреляная гильза остаётся в каморе, но рисуется пустой
                input.chambers[chamber] = false;
            }
        }
        OwnerAction::OpenForReload => {
            input.is_cylinder_open = true;
            input.is_reloading = true;
        }
        OwnerAction::FinishReload => {
            input.chambers = [true; CHAMBER_COUNT];
            input.is_reloading = false;
            input.is_cylinder_open = false;
        }
    }
}

fn main() {
    let seed = 42;
    println!("Starting revolver headless demo (seed: {})", seed);

    let mut app = create_fixed_step_app(seed, FRAME);
    let config = RevolverConfig::default();
    let revolver = app
        .world_mut()
        .spawn(revolver_bundle(&config, FireEvent::fully_loaded()))
        .id();

    for tick in 0..540 {
        if let Some(action) = scripted_action(tick) {
            if let Some(mut input) = app.world_mut().get_mut::<FireEvent>(revolver) {
                apply(&mut input, action);
            }
        }

        app.update();

        if tick % 30 == 1 {
            if let Some(frame) = RevolverFrame::of(app.world(), revolver) {
                let smoke = frame.smoke_slots.iter().filter(|slot| slot.active).count();
                log_info(&format!(
                    "Tick {}: roll={:.3} cyl={:.3} crane={:.3} hammer={:.3} flash={} smoke={} loaded={:?}",
                    tick,
                    frame.pose.assembly_roll,
                    frame.pose.cylinder_roll,
                    frame.pose.crane_roll,
                    frame.pose.hammer_roll,
                    frame.flash_active,
                    smoke,
                    frame.cartridges.visible
                ));
            }
        }
    }

    println!("Demo complete!");
}
