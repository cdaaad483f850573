//! Interactive exploration: prompt for filters, print statistics, page raw
//! trips, and offer a restart.

use anyhow::{Context, Result, bail};
use std::io::{BufRead, Write};
use std::str::FromStr;
use std::time::Instant;
use tracing::{debug, info};

use crate::config::CityCatalog;
use crate::error::BikeshareError;
use crate::filters::{FilterSpec, MonthFilter, WeekdayFilter};
use crate::loader::load;
use crate::output::{RULE, SECTIONS, raw_page};
use crate::trips::TripSet;

/// The user-facing side of a session: a blocking question/answer channel.
pub trait Prompt {
    /// Shows `question` and blocks until an answer line is available.
    fn ask(&mut self, question: &str) -> Result<String>;

    fn tell(&mut self, text: &str) -> Result<()>;
}

/// [`Prompt`] over a buffered reader and a writer, normally stdin/stdout.
pub struct StdioPrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> StdioPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Prompt for StdioPrompt<R, W> {
    fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{question} ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line).context("reading answer")? == 0 {
            bail!("input closed while waiting for an answer to: {question}");
        }
        Ok(line.trim().to_string())
    }

    fn tell(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }
}

/// Asks `question` until the answer parses, reprompting after `sorry`.
fn ask_until_valid<P, T, F>(prompt: &mut P, question: &str, sorry: &str, parse: F) -> Result<T>
where
    P: Prompt + ?Sized,
    F: Fn(&str) -> Result<T, BikeshareError>,
{
    loop {
        let answer = prompt.ask(question)?;
        match parse(&answer) {
            Ok(value) => return Ok(value),
            Err(e) if e.is_invalid_choice() => {
                debug!(error = %e, "Invalid choice, asking again");
                prompt.tell(sorry)?;
            }
            Err(e) => return Err(e.into()),
        }
    }
}

fn ask_yes<P: Prompt + ?Sized>(prompt: &mut P, question: &str) -> Result<bool> {
    Ok(prompt.ask(question)?.eq_ignore_ascii_case("yes"))
}

/// Prompts for city, month and weekday, each until valid.
pub fn get_filters<P: Prompt + ?Sized>(prompt: &mut P, catalog: &CityCatalog) -> Result<FilterSpec> {
    let cities = catalog.names().collect::<Vec<_>>().join(", ");
    prompt.tell(&format!(
        "Hello! Let's explore some US bikeshare data! Available cities: {cities}."
    ))?;

    let city = ask_until_valid(
        prompt,
        "Enter name of a city:",
        "Sorry, data not available for that city",
        |answer| catalog.resolve(answer).map(|(name, _)| name.to_string()),
    )?;
    let month = ask_until_valid(
        prompt,
        "Choose month (january to june, or all):",
        "Sorry, data not available for that month",
        MonthFilter::from_str,
    )?;
    let weekday = ask_until_valid(
        prompt,
        "Choose weekday (monday to sunday, or all):",
        "Invalid input",
        WeekdayFilter::from_str,
    )?;

    prompt.tell(RULE)?;
    Ok(FilterSpec {
        city,
        month,
        weekday,
    })
}

/// Prints every statistics section with its elapsed time.
pub fn print_statistics<P: Prompt + ?Sized>(prompt: &mut P, trips: &TripSet) -> Result<()> {
    for section in &SECTIONS {
        let start = Instant::now();
        let body = (section.render)(trips);
        let elapsed = start.elapsed();

        prompt.tell(&format!("\n{}\n", section.title))?;
        prompt.tell(body.trim_end())?;
        prompt.tell(&format!("\nThis took {} seconds.", elapsed.as_secs_f64()))?;
        prompt.tell(RULE)?;
    }
    Ok(())
}

/// Offers raw trips five at a time until declined or exhausted.
pub fn show_raw_data<P: Prompt + ?Sized>(prompt: &mut P, trips: &TripSet) -> Result<()> {
    if !ask_yes(prompt, "\nWould you like to see the raw data? Enter yes or no.")? {
        return Ok(());
    }

    let mut page = 0;
    loop {
        match raw_page(trips, page)? {
            Some(rows) => prompt.tell(rows.trim_end())?,
            None => {
                prompt.tell("No more raw data to display.")?;
                return Ok(());
            }
        }
        page += 1;
        if !ask_yes(prompt, "\nWould you like to see more raw data? Enter yes or no.")? {
            return Ok(());
        }
    }
}

/// Runs filter selection → load → statistics → raw data, repeating while the
/// user asks to restart.
pub fn run<P: Prompt + ?Sized>(prompt: &mut P, catalog: &CityCatalog) -> Result<()> {
    loop {
        let spec = get_filters(prompt, catalog)?;
        info!(city = %spec.city, month = %spec.month, weekday = %spec.weekday, "Session started");

        let trips = load(catalog, &spec)
            .with_context(|| format!("loading trips for {}", spec.city))?;

        print_statistics(prompt, &trips)?;
        show_raw_data(prompt, &trips)?;

        if !ask_yes(prompt, "\nWould you like to restart? Enter yes or no.")? {
            info!("Session finished");
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::env;
    use std::fs;
    use std::path::PathBuf;

    /// Replays canned answers and records everything shown.
    struct ScriptedPrompt {
        answers: VecDeque<String>,
        questions: Vec<String>,
        shown: Vec<String>,
    }

    impl ScriptedPrompt {
        fn new(answers: &[&str]) -> Self {
            Self {
                answers: answers.iter().map(|a| a.to_string()).collect(),
                questions: Vec::new(),
                shown: Vec::new(),
            }
        }

        fn transcript(&self) -> String {
            self.shown.join("\n")
        }
    }

    impl Prompt for ScriptedPrompt {
        fn ask(&mut self, question: &str) -> Result<String> {
            self.questions.push(question.to_string());
            self.answers
                .pop_front()
                .ok_or_else(|| anyhow::anyhow!("script exhausted at: {question}"))
        }

        fn tell(&mut self, text: &str) -> Result<()> {
            self.shown.push(text.to_string());
            Ok(())
        }
    }

    const CSV: &str = "\
Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
2017-01-02 08:00:00,2017-01-02 08:05:00,100,A,B,Subscriber,Male,1980
2017-01-03 08:00:00,2017-01-03 08:05:00,200,A,B,Subscriber,Female,1990
2017-02-06 08:00:00,2017-02-06 08:05:00,300,B,A,Customer,,
2017-02-07 08:00:00,2017-02-07 08:05:00,300,B,A,Customer,,
2017-02-08 08:00:00,2017-02-08 08:05:00,300,B,A,Customer,,
2017-02-09 08:00:00,2017-02-09 08:05:00,300,B,A,Customer,,
2017-02-10 08:00:00,2017-02-10 08:05:00,300,B,A,Customer,,
";

    fn catalog(dir_name: &str) -> (PathBuf, CityCatalog) {
        let dir = env::temp_dir().join(dir_name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("chicago.csv"), CSV).unwrap();
        (dir.clone(), CityCatalog::default().with_data_dir(dir))
    }

    #[test]
    fn test_get_filters_reprompts_until_valid() {
        let catalog = CityCatalog::default();
        let mut prompt = ScriptedPrompt::new(&["boston", "CHICAGO", "july", "March", "mon", "friday"]);

        let spec = get_filters(&mut prompt, &catalog).unwrap();
        assert_eq!(spec.city, "chicago");
        assert_eq!(spec.month.to_string(), "March");
        assert_eq!(spec.weekday.to_string(), "Friday");
        assert_eq!(prompt.questions.len(), 6);

        let transcript = prompt.transcript();
        assert!(transcript.contains("Sorry, data not available for that city"));
        assert!(transcript.contains("Sorry, data not available for that month"));
        assert!(transcript.contains("Invalid input"));
    }

    #[test]
    fn test_run_full_session_without_raw_data() {
        let (dir, catalog) = catalog("bikeshare_stats_test_session_run");
        let mut prompt = ScriptedPrompt::new(&["chicago", "january", "all", "no", "no"]);

        run(&mut prompt, &catalog).unwrap();

        let transcript = prompt.transcript();
        assert!(transcript.contains("The total duration of trips is... 300 seconds"));
        assert!(transcript.contains("The average duration of trips is... 150.00 seconds"));
        assert!(transcript.contains("The gender breakdown is..."));
        assert!(transcript.contains("This took"));

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_raw_data_pages_until_exhausted() {
        let (dir, catalog) = catalog("bikeshare_stats_test_session_raw");
        let trips = load(
            &catalog,
            &FilterSpec::parse(&catalog, "chicago", "all", "all").unwrap(),
        )
        .unwrap();

        let mut prompt = ScriptedPrompt::new(&["yes", "yes", "yes"]);
        show_raw_data(&mut prompt, &trips).unwrap();

        // Two pages (5 + 2 rows) then the end notice.
        assert_eq!(prompt.shown.len(), 3);
        assert_eq!(prompt.shown[0].lines().count(), 5);
        assert_eq!(prompt.shown[1].lines().count(), 2);
        assert_eq!(prompt.shown[2], "No more raw data to display.");
        assert!(prompt.answers.is_empty());

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_restart_runs_a_second_selection() {
        let (dir, catalog) = catalog("bikeshare_stats_test_session_restart");
        let mut prompt = ScriptedPrompt::new(&[
            "chicago", "all", "all", "no", "yes", "chicago", "june", "all", "no", "no",
        ]);

        run(&mut prompt, &catalog).unwrap();

        let transcript = prompt.transcript();
        assert!(transcript.contains("The total duration of trips is... 1800 seconds"));
        assert!(transcript.contains("No trips match this selection."));
        assert!(prompt.answers.is_empty());

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_run_stops_on_malformed_trip_file() {
        let dir = env::temp_dir().join("bikeshare_stats_test_session_malformed");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("washington.csv"),
            "Start Time,Trip Duration,Start Station,End Station,User Type\n\
             2017-01-02 08:00:00,60,A,B,Subscriber\n\
             not a time,60,A,B,Subscriber\n",
        )
        .unwrap();
        let catalog = CityCatalog::default().with_data_dir(&dir);
        let mut prompt = ScriptedPrompt::new(&["washington", "all", "all"]);

        let err = run(&mut prompt, &catalog).unwrap_err();
        assert_eq!(err.to_string(), "loading trips for washington");
        assert!(matches!(
            err.downcast_ref::<BikeshareError>(),
            Some(BikeshareError::MalformedInput { row: 2, .. })
        ));
        // Nothing past the load ran.
        assert!(!prompt.transcript().contains("Calculating"));
        assert!(prompt.answers.is_empty());

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_stdio_prompt_errors_on_closed_input() {
        let mut out = Vec::new();
        let mut prompt = StdioPrompt::new("chicago\n".as_bytes(), &mut out);
        assert_eq!(prompt.ask("City?").unwrap(), "chicago");
        assert!(prompt.ask("Month?").is_err());
    }
}
