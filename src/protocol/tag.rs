//! Command names the tracker understands.
//!
//! Several wire commands multiplex more than one event (`$sset` carries deck
//! definitions, self identity and game start). The tag names the wire
//! command; the transition picks the event from its keyed arguments.

/// Recognized command names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommandTag {
    Welcome,
    Set,
    ClearRoom,
    ServerSet,
    SetQuantity,
    Iam,
    SetRankedMode,
    PlayerState,
    HarvestFaeria,
    PayFaeria,
    FaeriaGain,
    NewTurn,
    CreateGameCard,
    ComeIntoPlay,
    ZoneMove,
    StartGame,
    StopGame,
    Victory,
    CreateTokenLand,
}

impl CommandTag {
    /// Every recognized command.
    pub const ALL: [CommandTag; 19] = [
        CommandTag::Welcome,
        CommandTag::Set,
        CommandTag::ClearRoom,
        CommandTag::ServerSet,
        CommandTag::SetQuantity,
        CommandTag::Iam,
        CommandTag::SetRankedMode,
        CommandTag::PlayerState,
        CommandTag::HarvestFaeria,
        CommandTag::PayFaeria,
        CommandTag::FaeriaGain,
        CommandTag::NewTurn,
        CommandTag::CreateGameCard,
        CommandTag::ComeIntoPlay,
        CommandTag::ZoneMove,
        CommandTag::StartGame,
        CommandTag::StopGame,
        CommandTag::Victory,
        CommandTag::CreateTokenLand,
    ];

    /// Look up a command by its exact wire name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let tag = match name {
            "$welcome" => CommandTag::Welcome,
            "$set" => CommandTag::Set,
            "$clearRoom" => CommandTag::ClearRoom,
            "$sset" => CommandTag::ServerSet,
            "$setQuantity" => CommandTag::SetQuantity,
            "~iam" => CommandTag::Iam,
            "$setRankedMode" => CommandTag::SetRankedMode,
            "~playerState" => CommandTag::PlayerState,
            "#HarvestFaeria" => CommandTag::HarvestFaeria,
            "#PayFaeria" => CommandTag::PayFaeria,
            "#FaeriaGain" => CommandTag::FaeriaGain,
            "~newTurn" => CommandTag::NewTurn,
            "*createGameCard" => CommandTag::CreateGameCard,
            "#ComeIntoPlay" => CommandTag::ComeIntoPlay,
            "#ZoneMove" => CommandTag::ZoneMove,
            "$startGame" => CommandTag::StartGame,
            "$stopGame" => CommandTag::StopGame,
            "$victory" => CommandTag::Victory,
            "#CreateTokenLand" => CommandTag::CreateTokenLand,
            _ => return None,
        };
        Some(tag)
    }

    /// Wire name of the command.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            CommandTag::Welcome => "$welcome",
            CommandTag::Set => "$set",
            CommandTag::ClearRoom => "$clearRoom",
            CommandTag::ServerSet => "$sset",
            CommandTag::SetQuantity => "$setQuantity",
            CommandTag::Iam => "~iam",
            CommandTag::SetRankedMode => "$setRankedMode",
            CommandTag::PlayerState => "~playerState",
            CommandTag::HarvestFaeria => "#HarvestFaeria",
            CommandTag::PayFaeria => "#PayFaeria",
            CommandTag::FaeriaGain => "#FaeriaGain",
            CommandTag::NewTurn => "~newTurn",
            CommandTag::CreateGameCard => "*createGameCard",
            CommandTag::ComeIntoPlay => "#ComeIntoPlay",
            CommandTag::ZoneMove => "#ZoneMove",
            CommandTag::StartGame => "$startGame",
            CommandTag::StopGame => "$stopGame",
            CommandTag::Victory => "$victory",
            CommandTag::CreateTokenLand => "#CreateTokenLand",
        }
    }
}

impl std::fmt::Display for CommandTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
