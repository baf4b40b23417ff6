use std::fmt::Write;

use ui::vm::{OptionStatus, QuestionVm, ResultsVm, ScreenVm};

const RESET: &str = "\x1b[0m";
const CLEAR: &str = "\x1b[2J\x1b[H";

/// ANSI colours for one theme.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    text: &'static str,
    muted: &'static str,
    accent: &'static str,
    correct: &'static str,
    incorrect: &'static str,
    selected: &'static str,
}

impl Palette {
    #[must_use]
    pub fn for_theme(dark: bool) -> Self {
        if dark {
            Self {
                text: "\x1b[97;40m",
                muted: "\x1b[37;40m",
                accent: "\x1b[96;40m",
                correct: "\x1b[30;102m",
                incorrect: "\x1b[30;101m",
                selected: "\x1b[30;47m",
            }
        } else {
            Self {
                text: "\x1b[30m",
                muted: "\x1b[90m",
                accent: "\x1b[34m",
                correct: "\x1b[30;42m",
                incorrect: "\x1b[97;41m",
                selected: "\x1b[30;46m",
            }
        }
    }
}

/// Render a whole screen, starting with a terminal clear.
#[must_use]
pub fn render(screen: &ScreenVm, palette: Palette) -> String {
    let mut out = String::from(CLEAR);
    // Writing into a String cannot fail.
    let _ = match screen {
        ScreenVm::Loading => writeln!(out, "{}Loading questions...{RESET}", palette.muted),
        ScreenVm::Error { message } => writeln!(
            out,
            "{}{message}{RESET}\n{}[r] Retry  [q] Quit{RESET}",
            palette.incorrect, palette.muted
        ),
        ScreenVm::Question(vm) => write_question(&mut out, vm, palette),
        ScreenVm::Results(vm) => write_results(&mut out, vm, palette),
    };
    out
}

fn write_question(out: &mut String, vm: &QuestionVm, palette: Palette) -> std::fmt::Result {
    writeln!(out, "{}{}{RESET}", palette.accent, vm.time_label)?;
    writeln!(out, "{}{}{RESET}", palette.muted, progress_bar(vm.progress, 30))?;
    writeln!(out, "{}{}{RESET}\n", palette.muted, vm.counter_label)?;
    writeln!(out, "{}{}{RESET}\n", palette.text, vm.prompt)?;

    for option in &vm.options {
        let colour = match option.status {
            OptionStatus::Idle => palette.text,
            OptionStatus::Selected => palette.selected,
            OptionStatus::Correct => palette.correct,
            OptionStatus::Incorrect => palette.incorrect,
        };
        writeln!(out, "  {colour}{}. {}{RESET}", option.index + 1, option.label)?;
    }

    let flames = "*".repeat(vm.streak.lit_flames);
    let extra = vm.streak.extra_label.as_deref().unwrap_or("");
    writeln!(out, "\n{}Streak: {flames}{extra}{RESET}", palette.accent)?;
    if vm.streak.celebrate {
        writeln!(out, "{}Three in a row!{RESET}", palette.correct)?;
    }

    let mut actions = Vec::new();
    if vm.can_skip {
        actions.push("[s] Skip");
    }
    if vm.can_go_previous {
        actions.push("[p] Prev");
    }
    if vm.can_go_next {
        actions.push("[n] Next");
    }
    actions.push("[f] Finish");
    writeln!(out, "{}{}{RESET}", palette.muted, actions.join("  "))
}

fn write_results(out: &mut String, vm: &ResultsVm, palette: Palette) -> std::fmt::Result {
    writeln!(out, "{}Test Complete!{RESET}\n", palette.accent)?;
    writeln!(out, "{}{}{RESET}", palette.accent, vm.score_label)?;
    writeln!(out, "{}{} Correct Answers{RESET}\n", palette.text, vm.correct_label)?;
    writeln!(
        out,
        "{}Correct {}  Wrong {}  Skipped {}  Streak {}{RESET}\n",
        palette.text, vm.correct, vm.wrong, vm.skipped, vm.longest_streak
    )?;
    writeln!(out, "{}{}{RESET}\n", palette.muted, vm.share_text)?;
    writeln!(out, "{}[r] Restart  [q] Quit{RESET}", palette.muted)
}

fn progress_bar(progress: f32, width: usize) -> String {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let filled = ((progress.clamp(0.0, 1.0) * width as f32).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}
