//! Duel configuration.
//!
//! A `DuelConfig` fixes everything about a duel except the shuffle: how
//! many real and fake shells go into the chamber, how hard a shot hits,
//! and how many charges of each item both players start with. Charges
//! are applied identically to both sides.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// Configuration for one duel.
///
/// Defaults give the canonical setting: a 5/5 chamber, 34 damage per
/// shot, 100 max hp, one charge of every item, random starting player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuelConfig {
    /// Number of real (damaging) shells loaded into the chamber.
    pub real_shells: u32,

    /// Number of fake (harmless) shells loaded into the chamber.
    pub fake_shells: u32,

    /// Hp removed by one undoubled real shot; also the amount one heal
    /// restores.
    pub damage_per_shot: i32,

    /// Hp both players start with, and the cap heals clamp to.
    pub max_hp: i32,

    /// Heal charges per player.
    pub heal_charges: u8,

    /// Reveal charges per player.
    pub reveal_charges: u8,

    /// Skip-bullet charges per player.
    pub skip_bullet_charges: u8,

    /// Skip-round charges per player.
    pub skip_round_charges: u8,

    /// Damage-double charges per player.
    pub double_charges: u8,

    /// Force a starting player; `None` picks one uniformly from the
    /// duel's seeded generator.
    pub starting_player: Option<PlayerId>,
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self {
            real_shells: 5,
            fake_shells: 5,
            damage_per_shot: 34,
            max_hp: 100,
            heal_charges: 1,
            reveal_charges: 1,
            skip_bullet_charges: 1,
            skip_round_charges: 1,
            double_charges: 1,
            starting_player: None,
        }
    }
}

impl DuelConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the chamber composition.
    #[must_use]
    pub fn with_shells(mut self, real: u32, fake: u32) -> Self {
        self.real_shells = real;
        self.fake_shells = fake;
        self
    }

    /// Set the damage per shot.
    #[must_use]
    pub fn with_damage(mut self, damage: i32) -> Self {
        self.damage_per_shot = damage;
        self
    }

    /// Set the maximum hp.
    #[must_use]
    pub fn with_max_hp(mut self, max_hp: i32) -> Self {
        self.max_hp = max_hp;
        self
    }

    /// Set the same charge count for every item.
    #[must_use]
    pub fn with_item_charges(mut self, charges: u8) -> Self {
        self.heal_charges = charges;
        self.reveal_charges = charges;
        self.skip_bullet_charges = charges;
        self.skip_round_charges = charges;
        self.double_charges = charges;
        self
    }

    /// Set heal charges.
    #[must_use]
    pub fn with_heal(mut self, charges: u8) -> Self {
        self.heal_charges = charges;
        self
    }

    /// Set reveal charges.
    #[must_use]
    pub fn with_reveal(mut self, charges: u8) -> Self {
        self.reveal_charges = charges;
        self
    }

    /// Set skip-bullet charges.
    #[must_use]
    pub fn with_skip_bullet(mut self, charges: u8) -> Self {
        self.skip_bullet_charges = charges;
        self
    }

    /// Set skip-round charges.
    #[must_use]
    pub fn with_skip_round(mut self, charges: u8) -> Self {
        self.skip_round_charges = charges;
        self
    }

    /// Set damage-double charges.
    #[must_use]
    pub fn with_double(mut self, charges: u8) -> Self {
        self.double_charges = charges;
        self
    }

    /// Force the starting player instead of picking one at random.
    #[must_use]
    pub fn with_starting_player(mut self, player: PlayerId) -> Self {
        self.starting_player = Some(player);
        self
    }

    /// Total number of shells the chamber will hold.
    #[must_use]
    pub fn chamber_len(&self) -> usize {
        (self.real_shells + self.fake_shells) as usize
    }
}
