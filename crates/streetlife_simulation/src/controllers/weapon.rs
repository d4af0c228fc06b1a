//! Оружие игрока: темп стрельбы, патроны, щелчок вхолостую
//!
//! Хост шлёт FireRequest на кадре выстрела анимации. Дальше:
//! - темп не вышел → запрос игнорируется
//! - патронов нет → Click (звук + сброс таймера темпа)
//! - иначе → Shot: звук, "Fire" аниматору, -1 патрон, ShotFired для raycast

use bevy::prelude::*;

use super::player::{Player, PlayerStatus};
use super::{AudioCue, FireRequest, ShotFired};
use crate::components::{Animator, Health};

#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Weapon {
    /// Минимальный интервал между выстрелами (секунды)
    pub rate_of_fire: f32,
    /// Время последнего выстрела или щелчка
    pub last_shot: f32,
    pub shot_clip: String,
    pub click_clip: String,
}

impl Default for Weapon {
    fn default() -> Self {
        Self {
            rate_of_fire: 0.25,
            last_shot: 0.0,
            shot_clip: "Weapon Shot".to_string(),
            click_clip: "Weapon Click".to_string(),
        }
    }
}

impl Weapon {
    /// Интервал с прошлого выстрела строго больше rate_of_fire
    pub fn is_inside_shot_rate(&self, now: f32) -> bool {
        self.rate_of_fire < now - self.last_shot
    }
}

/// Результат попытки выстрела
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireOutcome {
    /// Темп стрельбы ещё не позволяет
    Blocked,
    /// Пустой магазин
    Click,
    Shot,
}

/// Проверки оружия + списание патрона
pub fn try_fire(weapon: &mut Weapon, status: &mut PlayerStatus, now: f32) -> FireOutcome {
    if !weapon.is_inside_shot_rate(now) {
        return FireOutcome::Blocked;
    }

    weapon.last_shot = now;

    if status.decrease_munition() {
        FireOutcome::Shot
    } else {
        FireOutcome::Click
    }
}

/// Система: FireRequest → Click / ShotFired
pub fn fire_weapons(
    mut requests: EventReader<FireRequest>,
    mut players: Query<(&mut Weapon, &mut PlayerStatus, &Health, &Transform, Option<&mut Animator>), With<Player>>,
    mut audio: EventWriter<AudioCue>,
    mut shots: EventWriter<ShotFired>,
    time: Res<Time<Fixed>>,
) {
    let now = time.elapsed_secs();

    for request in requests.read() {
        let Ok((mut weapon, mut status, health, transform, animator)) = players.get_mut(request.player) else {
            continue;
        };
        if !health.is_alive() {
            continue;
        }

        match try_fire(&mut weapon, &mut status, now) {
            FireOutcome::Blocked => {}
            FireOutcome::Click => {
                audio.write(AudioCue {
                    source: request.player,
                    clip: weapon.click_clip.clone(),
                });
            }
            FireOutcome::Shot => {
                audio.write(AudioCue {
                    source: request.player,
                    clip: weapon.shot_clip.clone(),
                });
                if let Some(mut animator) = animator {
                    animator.set_trigger("Fire");
                }
                shots.write(ShotFired {
                    player: request.player,
                    origin: transform.translation,
                    direction: transform.forward().as_vec3(),
                });
                crate::log(&format!("🔫 {:?} fired, {} rounds left", request.player, status.munition));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shot_rate_gate() {
        let mut weapon = Weapon::default();
        let mut status = PlayerStatus::default();

        assert_eq!(try_fire(&mut weapon, &mut status, 1.0), FireOutcome::Shot);
        assert_eq!(try_fire(&mut weapon, &mut status, 1.1), FireOutcome::Blocked);
        // Ровно rate_of_fire: ещё рано
        assert_eq!(try_fire(&mut weapon, &mut status, 1.25), FireOutcome::Blocked);
        assert_eq!(try_fire(&mut weapon, &mut status, 1.3), FireOutcome::Shot);
        assert_eq!(status.munition, status.max_munition - 2);
    }

    #[test]
    fn test_empty_weapon_clicks_and_resets_rate() {
        let mut weapon = Weapon::default();
        let mut status = PlayerStatus {
            munition: 0,
            ..default()
        };

        assert_eq!(try_fire(&mut weapon, &mut status, 2.0), FireOutcome::Click);
        assert_eq!(weapon.last_shot, 2.0);
        assert_eq!(try_fire(&mut weapon, &mut status, 2.1), FireOutcome::Blocked);
    }
}
