use std::fmt;

/// Document-lifecycle signal consumed by the checkpoint machine.
///
/// Events are zero-argument and ephemeral: producers fire them whenever the
/// underlying condition holds, without knowing the current checkpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum CheckpointEvent {
    /// The first element was placed on a page.
    InitialElementAdded,
    /// The user pressed publish.
    PublishClicked,
    /// The story reached its second page.
    StoryHasTwoPages,
    /// The story reached its fifth page.
    #[serde(alias = "StoryHasFiveePages")]
    StoryHasFivePages,
    /// The story is already published.
    StoryIsPublished,
}

impl CheckpointEvent {
    /// Every event, in declaration order.
    pub const ALL: [CheckpointEvent; 5] = [
        CheckpointEvent::InitialElementAdded,
        CheckpointEvent::PublishClicked,
        CheckpointEvent::StoryHasTwoPages,
        CheckpointEvent::StoryHasFivePages,
        CheckpointEvent::StoryIsPublished,
    ];

    /// Stable identifier, identical to the serialized form.
    pub fn name(self) -> &'static str {
        match self {
            CheckpointEvent::InitialElementAdded => "InitialElementAdded",
            CheckpointEvent::PublishClicked => "PublishClicked",
            CheckpointEvent::StoryHasTwoPages => "StoryHasTwoPages",
            CheckpointEvent::StoryHasFivePages => "StoryHasFivePages",
            CheckpointEvent::StoryIsPublished => "StoryIsPublished",
        }
    }
}

impl fmt::Display for CheckpointEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}
