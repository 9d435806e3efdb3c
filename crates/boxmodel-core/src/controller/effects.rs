use super::{NavTarget, WindowController};
use crate::query::ResultSource;
use crate::statemachine::{ActionsState, ButtonAppearance, ButtonSpin, ResultsState, Transition};
use crate::view::ListModel;

impl WindowController {
    /// Run the entry and exit effects of `transitions`, in order.
    pub(super) fn apply_transitions(&mut self, transitions: &[Transition]) {
        for transition in transitions {
            match *transition {
                Transition::Appearance { to, .. } => self.enter_appearance(to),
                Transition::Spin { to, .. } => match to {
                    ButtonSpin::Slow => self.button.spin_slow(),
                    ButtonSpin::Fast => self.button.spin_fast(),
                },
                Transition::Results { from, to } => {
                    if from == ResultsState::Disabled {
                        self.results.input_transparent = false;
                    }
                    self.enter_results(to);
                }
                Transition::Actions { to, .. } => self.enter_actions(to),
            }
        }
    }

    fn enter_appearance(&mut self, state: ButtonAppearance) {
        match state {
            ButtonAppearance::Hidden => self.button.fade_out(),
            ButtonAppearance::Visible => self.button.fade_in(),
            ButtonAppearance::Highlighted => self.button.highlight(),
            ButtonAppearance::HighlightDelayed => {}
        }
    }

    fn enter_results(&mut self, state: ResultsState) {
        match state {
            ResultsState::Hidden => {
                self.nav = None;
                self.results.visible = false;
                self.results.set_model(None);
                self.input.completion.clear();
            }
            // Keep the stale rows on screen until the new query settles
            ResultsState::Disabled => {
                self.results.input_transparent = true;
                self.nav = None;
            }
            ResultsState::Matches => self.show_results(ResultSource::Matches),
            ResultsState::Fallbacks => self.show_results(ResultSource::Fallbacks),
        }
    }

    fn show_results(&mut self, source: ResultSource) {
        let model = self
            .query
            .clone()
            .map(|query| ListModel::Results { query, source });
        self.results.set_model(model);
        self.results.visible = true;
        self.nav = Some(NavTarget::Results);
        self.update_completion();
    }

    fn enter_actions(&mut self, state: ActionsState) {
        match state {
            ActionsState::Visible => {
                let actions = self
                    .results
                    .current_item()
                    .map(|item| item.actions)
                    .unwrap_or_default();
                self.actions.set_model(Some(ListModel::Actions(actions)));
                self.actions.visible = true;
                self.nav = Some(NavTarget::Actions);
            }
            ActionsState::Hidden => {
                self.actions.visible = false;
                self.actions.set_model(None);
                self.nav = self
                    .machine
                    .results()
                    .shows_list()
                    .then_some(NavTarget::Results);
            }
        }
    }
}
