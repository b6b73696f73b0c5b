//! Interactive attempt session.
//!
//! Drives one [`Attempt`] from the preview screen to a graded result. The
//! session owns the one-second countdown interval exclusively: it is created
//! after the explicit start and dropped when the loop ends, so no second
//! timer can ever tick the same attempt or double an auto-submission.

use std::time::Duration;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::time::MissedTickBehavior;

use quizdeck_core::attempt::{Attempt, AttemptState};
use quizdeck_core::model::AnswerKey;

/// Queued user-visible notices (storage warnings and the like), drained and
/// printed once at the end of a session instead of interleaved with the
/// question flow.
#[derive(Default)]
pub struct Notices {
    queue: Vec<String>,
}

impl Notices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notice: impl Into<String>) {
        self.queue.push(notice.into());
    }

    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.queue)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// How a session ended.
pub enum SessionEnd {
    /// The attempt was submitted (by hand or by the clock) and graded.
    Graded(Attempt),
    /// The user backed out before submitting; no record was created.
    Aborted,
}

/// Format seconds as `mm:ss`.
pub fn format_time(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// One line of user input during an attempt.
enum Command {
    Answer(usize, AnswerKey),
    Status,
    Submit,
    Quit,
    Unknown,
}

fn parse_command(line: &str) -> Command {
    let line = line.trim();
    match line.to_lowercase().as_str() {
        "status" => return Command::Status,
        "submit" => return Command::Submit,
        "quit" | "q" => return Command::Quit,
        _ => {}
    }

    let mut parts = line.split_whitespace();
    let number = parts.next().and_then(|n| n.parse::<usize>().ok());
    let key = parts.next().and_then(|k| k.parse::<AnswerKey>().ok());
    match (number, key, parts.next()) {
        (Some(n), Some(key), None) if n >= 1 => Command::Answer(n, key),
        _ => Command::Unknown,
    }
}

fn print_preview(attempt: &Attempt) {
    let quiz = attempt.quiz();
    println!("{}", quiz.title);
    if !quiz.description.is_empty() {
        println!("{}", quiz.description);
    }
    println!();
    println!("  Questions:  {}", attempt.question_count());
    println!("  Time limit: {} minutes", quiz.time_limit_minutes);
    println!(
        "  Order:      {}",
        if quiz.shuffle_questions {
            "randomized"
        } else {
            "sequential"
        }
    );
    println!();
    println!("Rules:");
    println!("  - The countdown starts when you do; running out of time submits for you");
    println!("  - Answer with `<question number> <letter>`, in any order");
    println!("  - You can change an answer any time before submitting");
    println!("  - `status` shows progress, `submit` grades, `quit` abandons");
    println!();
    println!("Press Enter to start, or type `quit` to go back to the quiz list.");
}

fn print_questions(attempt: &Attempt) {
    for (index, question) in attempt.questions().enumerate() {
        println!();
        println!("Q{}. {}", index + 1, question.text);
        for key in AnswerKey::ALL {
            println!("    {key}. {}", question.option(key));
        }
    }
    println!();
}

fn print_results(attempt: &Attempt) {
    use comfy_table::Table;

    let Some(record) = attempt.outcome() else {
        return;
    };

    println!();
    println!("Quiz complete!");
    for (index, verdict) in attempt.verdicts().iter().enumerate() {
        let mark = if verdict.is_correct() { "+" } else { "x" };
        let selected = verdict
            .selected
            .map(|k| k.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  [{mark}] Q{}: answered {selected}, correct {}",
            index + 1,
            verdict.correct
        );
    }

    let mut table = Table::new();
    table.set_header(vec!["Score", "Percentage", "Grade"]);
    table.add_row(vec![
        format!("{}/{}", record.score, record.total),
        format!("{}%", record.percentage),
        record.grade.to_string(),
    ]);
    println!("\n{table}");
    println!("{}", quizdeck_core::grading::encouragement(record.percentage));
}

/// Run one attempt against the given input stream.
///
/// The caller persists the completion record and renders report artifacts;
/// the session only drives the attempt and the console.
pub async fn run<R>(mut attempt: Attempt, input: R) -> Result<SessionEnd>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();

    print_preview(&attempt);
    match lines.next_line().await? {
        None => return Ok(SessionEnd::Aborted),
        Some(line) if matches!(parse_command(&line), Command::Quit) => {
            return Ok(SessionEnd::Aborted)
        }
        Some(_) => {}
    }

    attempt.start()?;
    print_questions(&attempt);
    println!("Started. {} on the clock.", format_time(attempt.remaining_secs()));

    // First tick lands one second in, not immediately.
    let period = Duration::from_secs(1);
    let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    while attempt.state() == AttemptState::InProgress {
        tokio::select! {
            _ = ticker.tick() => {
                if attempt.tick().is_some() {
                    println!("\nTime's up — submitting your answers.");
                    break;
                }
                let remaining = attempt.remaining_secs();
                if remaining == 10 || (remaining > 0 && remaining % 60 == 0) {
                    println!("{} remaining", format_time(remaining));
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    // Input went away without a submission: no record.
                    return Ok(SessionEnd::Aborted);
                };
                match parse_command(&line) {
                    Command::Answer(number, key) => {
                        let question_id = attempt.questions().nth(number - 1).map(|q| q.id);
                        match question_id {
                            Some(id) => {
                                attempt.record_answer(id, key)?;
                                println!("Q{number} = {key}");
                            }
                            None => println!("No question {number} on this quiz."),
                        }
                    }
                    Command::Status => {
                        println!(
                            "{} of {} answered, {} remaining",
                            attempt.answered_count(),
                            attempt.question_count(),
                            format_time(attempt.remaining_secs())
                        );
                    }
                    Command::Submit => {
                        attempt.submit();
                        break;
                    }
                    Command::Quit => return Ok(SessionEnd::Aborted),
                    Command::Unknown => {
                        println!("Commands: `<question number> <letter>`, status, submit, quit");
                    }
                }
            }
        }
    }

    // The ticker dies with this scope; nothing else can tick the attempt.
    print_results(&attempt);
    Ok(SessionEnd::Graded(attempt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizdeck_core::grading::Grade;
    use quizdeck_core::model::{Question, Quiz};
    use tokio::io::{AsyncWriteExt, BufReader};

    fn quiz(time_limit_minutes: u32) -> Quiz {
        Quiz {
            id: 1,
            title: "Session Quiz".into(),
            description: String::new(),
            time_limit_minutes,
            shuffle_questions: false,
            questions: vec![
                Question {
                    id: 10,
                    text: "first".into(),
                    option_a: "a".into(),
                    option_b: "b".into(),
                    option_c: "c".into(),
                    option_d: "d".into(),
                    correct: AnswerKey::A,
                    display_order: 1,
                },
                Question {
                    id: 20,
                    text: "second".into(),
                    option_a: "a".into(),
                    option_b: "b".into(),
                    option_c: "c".into(),
                    option_d: "d".into(),
                    correct: AnswerKey::C,
                    display_order: 2,
                },
            ],
        }
    }

    #[test]
    fn parse_commands() {
        assert!(matches!(parse_command("submit"), Command::Submit));
        assert!(matches!(parse_command(" QUIT "), Command::Quit));
        assert!(matches!(parse_command("status"), Command::Status));
        assert!(matches!(
            parse_command("2 c"),
            Command::Answer(2, AnswerKey::C)
        ));
        assert!(matches!(parse_command("0 A"), Command::Unknown));
        assert!(matches!(parse_command("2 c extra"), Command::Unknown));
        assert!(matches!(parse_command("nonsense"), Command::Unknown));
    }

    #[test]
    fn format_time_pads() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(65), "01:05");
        assert_eq!(format_time(600), "10:00");
    }

    #[tokio::test]
    async fn scripted_attempt_grades() {
        let input = b"\n1 A\n2 B\n1 A\nsubmit\n";
        let end = run(Attempt::new(quiz(5)), BufReader::new(&input[..]))
            .await
            .unwrap();

        let SessionEnd::Graded(attempt) = end else {
            panic!("expected a graded attempt");
        };
        let record = attempt.outcome().unwrap();
        assert_eq!(record.score, 1);
        assert_eq!(record.total, 2);
        assert_eq!(record.percentage, 50);
        assert_eq!(record.grade, Grade::CMinus);
    }

    #[tokio::test]
    async fn quit_at_preview_leaves_no_record() {
        let input = b"quit\n";
        let end = run(Attempt::new(quiz(5)), BufReader::new(&input[..]))
            .await
            .unwrap();
        assert!(matches!(end, SessionEnd::Aborted));
    }

    #[tokio::test]
    async fn eof_mid_attempt_leaves_no_record() {
        let input = b"\n1 A\n";
        let end = run(Attempt::new(quiz(5)), BufReader::new(&input[..]))
            .await
            .unwrap();
        assert!(matches!(end, SessionEnd::Aborted));
    }

    #[tokio::test(start_paused = true)]
    async fn expiry_auto_submits_exactly_once() {
        // Keep the write half alive so the input stays pending and only the
        // clock can end the session.
        let (mut writer, reader) = tokio::io::duplex(64);
        writer.write_all(b"\n1 A\n").await.unwrap();

        let handle = tokio::spawn(run(Attempt::new(quiz(1)), BufReader::new(reader)));
        let end = handle.await.unwrap().unwrap();

        let SessionEnd::Graded(attempt) = end else {
            panic!("expiry should grade the attempt");
        };
        let record = attempt.outcome().unwrap();
        assert_eq!(attempt.remaining_secs(), 0);
        assert_eq!(record.score, 1);
        assert_eq!(record.total, 2);
        drop(writer);
    }

    #[tokio::test(start_paused = true)]
    async fn expiry_with_no_answers_still_creates_a_record() {
        let (mut writer, reader) = tokio::io::duplex(64);
        writer.write_all(b"\n").await.unwrap();

        let end = run(Attempt::new(quiz(1)), BufReader::new(reader)).await.unwrap();
        let SessionEnd::Graded(attempt) = end else {
            panic!("expiry should grade the attempt");
        };
        let record = attempt.outcome().unwrap();
        assert_eq!(record.score, 0);
        assert_eq!(record.percentage, 0);
        assert_eq!(record.grade, Grade::F);
        drop(writer);
    }

    #[test]
    fn notices_queue_drains_once() {
        let mut notices = Notices::new();
        assert!(notices.is_empty());
        notices.push("completion record was not saved");
        notices.push("second");
        let drained = notices.drain();
        assert_eq!(drained.len(), 2);
        assert!(notices.is_empty());
    }
}
