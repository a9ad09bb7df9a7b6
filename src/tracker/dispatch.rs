//! Fixed command-tag to transition mapping.

use super::session::Session;
use super::{inference, transitions, Applied, Env};
use crate::core::TrackError;
use crate::protocol::{Command, CommandTag};

/// A state transition for one command.
pub type Transition = fn(&mut Session, &Env<'_>, &Command<'_>) -> Result<Applied, TrackError>;

/// The transition applied for `tag`.
#[must_use]
pub fn transition(tag: CommandTag) -> Transition {
    match tag {
        CommandTag::Welcome => transitions::welcome,
        CommandTag::Set => transitions::set,
        CommandTag::ClearRoom => transitions::clear_room,
        CommandTag::ServerSet => transitions::server_set,
        CommandTag::SetQuantity => transitions::set_quantity,
        CommandTag::Iam => transitions::iam,
        CommandTag::SetRankedMode => transitions::set_ranked_mode,
        CommandTag::PlayerState => transitions::player_state,
        CommandTag::HarvestFaeria => transitions::harvest_faeria,
        CommandTag::PayFaeria => transitions::pay_faeria,
        CommandTag::FaeriaGain => transitions::gain_faeria,
        CommandTag::NewTurn => transitions::new_turn,
        CommandTag::CreateGameCard => transitions::create_game_card,
        CommandTag::ComeIntoPlay => transitions::come_into_play,
        CommandTag::ZoneMove => inference::zone_move,
        CommandTag::StartGame => transitions::start_game_notice,
        CommandTag::StopGame => transitions::stop_game,
        CommandTag::Victory => transitions::victory,
        CommandTag::CreateTokenLand => transitions::create_token_land,
    }
}
