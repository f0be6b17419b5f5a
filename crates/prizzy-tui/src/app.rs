use std::time::Instant;

use ratatui::layout::Rect;
use tracing::{info, warn};

use prizzy_core::{CalculatorSet, ChatSession, CurrencyPair, GeminiClient, MentorService, Settings};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Calculators,
    Mentor,
}

/// Every editable field on the calculators screen, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcField {
    AccountBalance,
    RiskPercentage,
    PositionStopLoss,
    PositionPair,
    ProfitLossPips,
    ProfitLossLotSize,
    RiskRewardStopLoss,
    RiskRewardTakeProfit,
    PipValuePair,
    PipValueLotSize,
}

impl CalcField {
    pub const ALL: [CalcField; 10] = [
        CalcField::AccountBalance,
        CalcField::RiskPercentage,
        CalcField::PositionStopLoss,
        CalcField::PositionPair,
        CalcField::ProfitLossPips,
        CalcField::ProfitLossLotSize,
        CalcField::RiskRewardStopLoss,
        CalcField::RiskRewardTakeProfit,
        CalcField::PipValuePair,
        CalcField::PipValueLotSize,
    ];

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let len = Self::ALL.len();
        Self::ALL[(self.index() + len - 1) % len]
    }

    pub fn is_pair(self) -> bool {
        matches!(self, CalcField::PositionPair | CalcField::PipValuePair)
    }
}

/// Characters a numeric field accepts.
pub fn is_numeric_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')
}

pub struct App {
    pub should_quit: bool,
    pub view: View,

    // Splash
    pub show_splash: bool,
    pub splash_until: Instant,

    // Calculators state
    pub calculators: CalculatorSet,
    pub calc_focus: CalcField,

    // Mentor state
    pub chat: ChatSession,
    pub chat_input: String,
    pub chat_cursor: usize, // cursor position in chat_input, in chars
    pub chat_scroll: u16,
    pub chat_height: u16, // Height of chat area for scroll calculations
    pub chat_width: u16,  // Width of chat area for wrap calculations
    pub mentor_task: Option<tokio::task::JoinHandle<anyhow::Result<String>>>,
    pub animation_frame: u8, // 0-2 for ellipsis animation

    // Header tab areas for mouse hit-testing
    pub calculators_tab: Option<Rect>,
    pub mentor_tab: Option<Rect>,

    pub mentor: GeminiClient,
}

impl App {
    pub fn new(settings: &Settings) -> Self {
        let mentor = GeminiClient::new(
            settings.api_key.as_deref(),
            &settings.model,
            &settings.base_url,
        );
        if !mentor.has_api_key() {
            warn!("GEMINI_API_KEY environment variable not set. AI Mentor will not function.");
        }
        info!(model = %mentor.model(), "Mentor configured");

        Self {
            should_quit: false,
            view: View::Calculators,

            show_splash: !settings.splash.is_zero(),
            splash_until: Instant::now() + settings.splash,

            calculators: CalculatorSet::default(),
            calc_focus: CalcField::AccountBalance,

            chat: ChatSession::new(),
            chat_input: String::new(),
            chat_cursor: 0,
            chat_scroll: 0,
            chat_height: 0,
            chat_width: 0,
            mentor_task: None,
            animation_frame: 0,

            calculators_tab: None,
            mentor_tab: None,

            mentor,
        }
    }

    /// Switch views. The entered view always starts from fresh state, and a
    /// request still in flight for the mentor view is detached.
    pub fn set_view(&mut self, view: View) {
        if self.view == view {
            return;
        }

        if self.mentor_task.take().is_some() {
            info!("Leaving mentor view with a request in flight; its reply will be discarded");
        }

        match view {
            View::Calculators => {
                self.calculators = CalculatorSet::default();
                self.calc_focus = CalcField::AccountBalance;
            }
            View::Mentor => {
                self.chat = ChatSession::new();
                self.chat_input.clear();
                self.chat_cursor = 0;
                self.chat_scroll = 0;
            }
        }
        self.view = view;
    }

    /// Called by Tick event
    pub fn tick(&mut self) {
        if self.show_splash && Instant::now() >= self.splash_until {
            self.show_splash = false;
        }
        if self.chat.is_awaiting() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }

    // Calculator editing

    fn focused_text_mut(&mut self) -> Option<&mut String> {
        let calc = &mut self.calculators;
        match self.calc_focus {
            CalcField::AccountBalance => Some(&mut calc.position_size.account_balance),
            CalcField::RiskPercentage => Some(&mut calc.position_size.risk_percentage),
            CalcField::PositionStopLoss => Some(&mut calc.position_size.stop_loss_pips),
            CalcField::ProfitLossPips => Some(&mut calc.profit_loss.pips),
            CalcField::ProfitLossLotSize => Some(&mut calc.profit_loss.lot_size),
            CalcField::RiskRewardStopLoss => Some(&mut calc.risk_reward.stop_loss_pips),
            CalcField::RiskRewardTakeProfit => Some(&mut calc.risk_reward.take_profit_pips),
            CalcField::PipValueLotSize => Some(&mut calc.pip_value.lot_size),
            CalcField::PositionPair | CalcField::PipValuePair => None,
        }
    }

    fn focused_pair_mut(&mut self) -> Option<&mut CurrencyPair> {
        match self.calc_focus {
            CalcField::PositionPair => Some(&mut self.calculators.position_size.pair),
            CalcField::PipValuePair => Some(&mut self.calculators.pip_value.pair),
            _ => None,
        }
    }

    pub fn calc_focus_next(&mut self) {
        self.calc_focus = self.calc_focus.next();
    }

    pub fn calc_focus_prev(&mut self) {
        self.calc_focus = self.calc_focus.prev();
    }

    pub fn calc_insert(&mut self, c: char) {
        if !is_numeric_char(c) {
            return;
        }
        if let Some(text) = self.focused_text_mut() {
            text.push(c);
        }
    }

    pub fn calc_backspace(&mut self) {
        if let Some(text) = self.focused_text_mut() {
            text.pop();
        }
    }

    pub fn calc_cycle_pair(&mut self, forward: bool) {
        if let Some(pair) = self.focused_pair_mut() {
            *pair = if forward { pair.next() } else { pair.prev() };
        }
    }

    // Mentor chat

    /// Send the typed message, if the chat accepts it right now.
    pub fn submit_chat(&mut self) {
        let Some(request) = self.chat.submit(&self.chat_input) else {
            return;
        };

        self.chat_input.clear();
        self.chat_cursor = 0;
        self.scroll_chat_to_bottom();

        let mentor = self.mentor.clone();
        self.mentor_task = Some(tokio::spawn(async move {
            mentor.generate(&request).await
        }));
    }

    /// Feed a finished mentor task back into the chat.
    pub async fn poll_mentor_task(&mut self) {
        let finished = self
            .mentor_task
            .as_ref()
            .map(|task| task.is_finished())
            .unwrap_or(false);
        if !finished {
            return;
        }

        if let Some(task) = self.mentor_task.take() {
            let outcome = match task.await {
                Ok(result) => result,
                Err(e) => Err(anyhow::anyhow!("mentor task failed: {}", e)),
            };
            self.chat.resolve(outcome);
            self.scroll_chat_to_bottom();
        }
    }

    pub fn scroll_chat_up(&mut self, lines: u16) {
        self.chat_scroll = self.chat_scroll.saturating_sub(lines);
    }

    pub fn scroll_chat_down(&mut self, lines: u16) {
        self.chat_scroll = self.chat_scroll.saturating_add(lines);
    }

    /// Scroll chat to bottom so the newest message is visible
    pub fn scroll_chat_to_bottom(&mut self) {
        // Use actual chat width for wrap calculation, default to 50 if not set
        let wrap_width = if self.chat_width > 0 {
            self.chat_width as usize
        } else {
            50
        };

        let mut total_lines: u16 = 0;

        for msg in self.chat.messages() {
            total_lines = total_lines.saturating_add(1); // Sender line
            for line in msg.text.split('\n') {
                // Character count, not byte length
                let char_count = line.chars().count();
                total_lines = total_lines.saturating_add((char_count / wrap_width + 1) as u16);
            }
            total_lines = total_lines.saturating_add(1); // Blank line after message
        }

        if self.chat.is_awaiting() {
            total_lines = total_lines.saturating_add(2); // "Prizzy:" + "Thinking..."
        }

        let visible_height = if self.chat_height > 0 {
            self.chat_height
        } else {
            20
        };

        self.chat_scroll = total_lines.saturating_sub(visible_height);
    }
}
