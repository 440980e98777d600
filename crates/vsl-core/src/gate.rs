/// What pressing play did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// Content is locked; the lead form was opened instead.
    FormRequired,
    Playing,
    Paused,
}

/// Playback gate in front of the promotional video.
///
/// Starts muted. When `require_form` is set, playback stays locked until
/// [`GatedMedia::unlock`] is called after a successful lead submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatedMedia {
    require_form: bool,
    unlocked: bool,
    form_open: bool,
    playing: bool,
    muted: bool,
    started: bool,
}

impl GatedMedia {
    pub fn new(require_form: bool) -> Self {
        Self {
            require_form,
            unlocked: !require_form,
            form_open: false,
            playing: false,
            muted: true,
            started: false,
        }
    }

    pub fn press_play(&mut self) -> PlayOutcome {
        if !self.unlocked {
            self.form_open = true;
            tracing::debug!("playback locked, opening lead form");
            return PlayOutcome::FormRequired;
        }
        self.playing = !self.playing;
        if self.playing {
            self.started = true;
            PlayOutcome::Playing
        } else {
            PlayOutcome::Paused
        }
    }

    /// Opens the gate after a lead was stored and starts playback.
    pub fn unlock(&mut self) {
        self.unlocked = true;
        self.form_open = false;
        self.playing = true;
        self.started = true;
        tracing::info!("gated media unlocked");
    }

    /// Closing the form leaves the gate as it was.
    pub fn close_form(&mut self) {
        self.form_open = false;
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    pub fn requires_form(&self) -> bool {
        self.require_form
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn is_form_open(&self) -> bool {
        self.form_open
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn has_started(&self) -> bool {
        self.started
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locked_play_opens_form() {
        let mut gate = GatedMedia::new(true);
        assert_eq!(gate.press_play(), PlayOutcome::FormRequired);
        assert!(gate.is_form_open());
        assert!(!gate.is_playing());
        assert!(!gate.has_started());
    }

    #[test]
    fn unlock_closes_form_and_plays() {
        let mut gate = GatedMedia::new(true);
        gate.press_play();
        gate.unlock();
        assert!(gate.is_unlocked());
        assert!(!gate.is_form_open());
        assert!(gate.is_playing());
        assert_eq!(gate.press_play(), PlayOutcome::Paused);
        assert_eq!(gate.press_play(), PlayOutcome::Playing);
    }

    #[test]
    fn ungated_media_plays_immediately() {
        let mut gate = GatedMedia::new(false);
        assert_eq!(gate.press_play(), PlayOutcome::Playing);
        assert!(gate.has_started());
    }

    #[test]
    fn closing_form_keeps_gate_locked() {
        let mut gate = GatedMedia::new(true);
        gate.press_play();
        gate.close_form();
        assert!(!gate.is_form_open());
        assert!(!gate.is_unlocked());
    }

    #[test]
    fn starts_muted() {
        let mut gate = GatedMedia::new(true);
        assert!(gate.is_muted());
        assert!(!gate.toggle_mute());
    }
}
