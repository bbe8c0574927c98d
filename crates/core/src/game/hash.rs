//! Stable snapshot hashing for deterministic verification.
//! This module exists to keep hashing concerns separate from simulation control code.
//! It does not own replay execution or journal persistence.

use std::hash::Hasher;

use super::*;
use xxhash_rust::xxh3::Xxh3;

impl Game {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u64(self.tick);
        for id in [self.state.player_id, self.state.pet_id, self.state.enemy_id] {
            let agent = &self.state.agents[id];
            hasher.write_i32(agent.pos.x);
            hasher.write_i32(agent.pos.y);
            hasher.write_i32(agent.offset.x);
            hasher.write_i32(agent.offset.y);
            hasher.write_u8(agent.heading.map_or(u8::MAX, |heading| heading as u8));
        }
        let brain = &self.state.brain;
        hasher.write_u8(brain.state as u8);
        hasher.write_u32(brain.counter);
        write_pos(&mut hasher, Some(brain.last_known_player));
        write_pos(&mut hasher, brain.destination);
        write_pos(&mut hasher, brain.flare_target);
        for key in [ItemKey::Lives, ItemKey::Item, ItemKey::Whistle] {
            hasher.write_i32(self.state.inventory.count(key));
        }
        hasher.write_u8(match self.state.held {
            None => 0,
            Some(HeldItem::Flare) => 1,
            Some(HeldItem::Cereal) => 2,
        });
        hasher.write_u8(u8::from(self.state.pet_called));
        for cell in self.state.grid.cells() {
            hasher.write_i32(*cell);
        }
        hasher.finish()
    }
}

fn write_pos(hasher: &mut Xxh3, pos: Option<Pos>) {
    hasher.write_u8(u8::from(pos.is_some()));
    if let Some(pos) = pos {
        hasher.write_i32(pos.x);
        hasher.write_i32(pos.y);
    }
}
