//! Player actions, movement, and tile pickups.
//! This module exists so everything driven by `TickInput` lives together.
//! It does not own enemy reactions to those actions.

use super::*;
use crate::tiles::Tile;

impl Game {
    /// Applies one tick of input and returns whether a whistle was blown.
    pub(super) fn step_player(&mut self, input: &TickInput) -> bool {
        if input.drop_flare {
            self.drop_held(HeldItem::Flare, codes::FLARE_DROPPED);
        }
        if input.drop_cereal {
            self.drop_held(HeldItem::Cereal, codes::CEREAL_DROPPED);
        }
        let whistle = input.whistle && self.blow_whistle();

        let player_id = self.state.player_id;
        let before = self.state.player().pos;
        if let Some(direction) =
            Direction::dominant(i32::from(input.move_x), i32::from(input.move_y))
        {
            let steps = self.tuning.steps_per_tile;
            let grid = &self.state.grid;
            movement::try_move(&mut self.state.agents[player_id], direction, grid, steps);
        }
        let entered = self.state.player().pos != before;
        self.player_tile_effects(entered);
        whistle
    }

    fn drop_held(&mut self, item: HeldItem, code: i32) {
        if self.state.held != Some(item) {
            log::warn!("cannot drop {item:?}: not carrying it");
            return;
        }
        let pos = self.state.player().pos;
        if self.tile_code(pos) != codes::EMPTY {
            log::warn!("cannot drop {item:?} at {pos:?}: cell is occupied");
            return;
        }
        self.set_tile(pos, code);
        self.state.held = None;
        self.state.inventory.adjust(ItemKey::Item, -1);
        self.log.push(LogEvent::ItemDropped { item, pos });
    }

    fn blow_whistle(&mut self) -> bool {
        if self.state.inventory.count(ItemKey::Whistle) <= 0 {
            log::warn!("whistle ignored: no charges left");
            return false;
        }
        let remaining = self.state.inventory.adjust(ItemKey::Whistle, -1);
        self.log.push(LogEvent::WhistleBlown { remaining });
        self.log.push(LogEvent::PetCalled);
        self.state.pet_called = true;
        true
    }

    fn player_tile_effects(&mut self, entered: bool) {
        let pos = self.state.player().pos;
        match Tile::from_code(self.tile_code(pos)) {
            Tile::FlarePickup => self.pick_up(HeldItem::Flare, pos),
            Tile::CerealPickup => self.pick_up(HeldItem::Cereal, pos),
            Tile::LifePickup => {
                let lives = self.state.inventory.adjust(ItemKey::Lives, 1);
                self.set_tile(pos, codes::EMPTY);
                self.log.push(LogEvent::LivesChanged { lives });
            }
            Tile::Spikes if entered => {
                let lives = self.state.inventory.adjust(ItemKey::Lives, -1);
                log::debug!("spikes at {pos:?}, {lives} lives left");
                self.log.push(LogEvent::LivesChanged { lives });
            }
            Tile::Exit => {
                self.log.push(LogEvent::ExitReached);
                self.log.push(LogEvent::PlaySound(sounds::DONE));
                self.log.push(LogEvent::ScreenRequested(Screen::LoseWin));
                self.finish(RunOutcome::Victory);
            }
            _ => {}
        }
    }

    fn pick_up(&mut self, item: HeldItem, pos: Pos) {
        if self.state.held.is_some() {
            return;
        }
        self.set_tile(pos, codes::EMPTY);
        self.state.held = Some(item);
        self.state.inventory.adjust(ItemKey::Item, 1);
        self.log.push(LogEvent::ItemPickedUp { item });
        self.log.push(LogEvent::StopSound(sounds::BELL));
        self.log.push(LogEvent::PlaySound(sounds::BELL));
    }
}
