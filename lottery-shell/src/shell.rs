use std::{
    io::{BufRead, Write},
    ops::ControlFlow,
    str::FromStr,
    sync::Arc,
};

use lottery::{Amount, Series};
use parking_lot::Mutex;
use rand_chacha::ChaCha12Rng;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

pub type SharedSeries = Arc<Mutex<Series<ChaCha12Rng>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
enum Keyword {
    Help,
    Purchase,
    Draw,
    Winners,
    Pot,
    Exit,
}

impl Keyword {
    fn usage(&self) -> &'static str {
        match self {
            Keyword::Help => "help",
            Keyword::Purchase => "purchase %buyer's first name%",
            Keyword::Draw => "draw",
            Keyword::Winners => "winners",
            Keyword::Pot => "pot",
            Keyword::Exit => "exit",
        }
    }

    fn description(&self, ticket_price: Amount) -> String {
        match self {
            Keyword::Help => "Get this help message".to_owned(),
            Keyword::Purchase => format!("Purchase a ticket ({ticket_price}$)"),
            Keyword::Draw => "Draw lottery".to_owned(),
            Keyword::Winners => "Display winners".to_owned(),
            Keyword::Pot => "Display the current pot".to_owned(),
            Keyword::Exit => "Exit this application".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Purchase(String),
    Draw,
    Winners,
    Pot,
    Exit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "help" => Ok(Command::Help),
            "draw" => Ok(Command::Draw),
            "winners" => Ok(Command::Winners),
            "pot" => Ok(Command::Pot),
            "exit" => Ok(Command::Exit),
            _ => match s.strip_prefix("purchase") {
                // The buyer's name is whatever follows the keyword
                Some(name) => Ok(Command::Purchase(name.trim_start().to_owned())),
                None => Err(format!("Unknown command: \"{s}\"")),
            },
        }
    }
}

pub fn closing_message(pot: Amount) -> String {
    format!("Closing the application, the current pot is: {pot}$")
}

/// Interactive front-end of a lottery series: one command per input line.
pub struct Shell<W> {
    series: SharedSeries,
    out: W,
}

impl<W> Shell<W>
where
    W: Write,
{
    pub fn new(series: SharedSeries, out: W) -> Self {
        Self { series, out }
    }

    pub fn run<B: BufRead>(&mut self, mut input: B) -> anyhow::Result<()> {
        self.splash()?;

        let mut line = String::new();
        loop {
            let pot = self.series.lock().get_pot();
            write!(self.out, "Current pot: {pot}$ > ")?;
            self.out.flush()?;

            line.clear();
            // End of input behaves like `exit`
            if input.read_line(&mut line)? == 0 {
                writeln!(self.out)?;
                self.execute(Command::Exit)?;
                return Ok(());
            }

            let input_command = line.trim_end_matches(['\r', '\n']);
            if input_command.is_empty() {
                continue;
            }
            match input_command.parse::<Command>() {
                Ok(command) => {
                    if self.execute(command)?.is_break() {
                        return Ok(());
                    }
                }
                Err(message) => writeln!(self.out, "{message}")?,
            }
        }
    }

    pub fn execute(&mut self, command: Command) -> anyhow::Result<ControlFlow<()>> {
        tracing::debug!("Command: {:?}", command);
        let mut series = self.series.lock();
        match command {
            Command::Help => {
                let ticket_price = series.config().ticket_price;
                drop(series);
                self.help(ticket_price)?;
            }
            Command::Purchase(buyer_name) => match series.purchase_ticket(&buyer_name) {
                Ok(ticket) => {
                    writeln!(self.out, "Ticket {ticket} was purchased by {buyer_name}.")?
                }
                Err(e) => writeln!(self.out, "{e}")?,
            },
            Command::Draw => {
                let balls = series.draw();
                writeln!(self.out, "Lottery draw: {balls:?}")?;
                writeln!(
                    self.out,
                    "The prizes of the winners (if there are any) are now subtracted from the pot."
                )?;
            }
            Command::Winners => match series.generate_winners_message() {
                Ok(message) => writeln!(self.out, "{message}")?,
                Err(e) => writeln!(self.out, "{e}")?,
            },
            Command::Pot => writeln!(self.out, "The current pot is: {}$", series.get_pot())?,
            Command::Exit => {
                writeln!(self.out, "{}", closing_message(series.get_pot()))?;
                return Ok(ControlFlow::Break(()));
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    fn splash(&mut self) -> anyhow::Result<()> {
        let (pot, ticket_price) = {
            let series = self.series.lock();
            (series.get_pot(), series.config().ticket_price)
        };
        writeln!(self.out, "Welcome to the Lottery!")?;
        writeln!(self.out, "The current pot is: {pot}$")?;
        writeln!(self.out, "The following commands are available:")?;
        self.help(ticket_price)
    }

    fn help(&mut self, ticket_price: Amount) -> anyhow::Result<()> {
        for keyword in Keyword::iter() {
            writeln!(
                self.out,
                "{}\t{}",
                keyword.usage(),
                keyword.description(ticket_price)
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use lottery::{LotteryConfig, INITIAL_POT, NB_WINNERS, TICKET_PRICE};
    use rand::SeedableRng;

    use super::*;

    fn new_shell(seed: u64) -> Shell<Vec<u8>> {
        let series = Series::new(LotteryConfig::default(), ChaCha12Rng::seed_from_u64(seed));
        Shell::new(Arc::new(Mutex::new(series)), Vec::new())
    }

    fn output(shell: &Shell<Vec<u8>>) -> String {
        String::from_utf8(shell.out.clone()).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!("help".parse::<Command>(), Ok(Command::Help));
        assert_eq!("draw".parse::<Command>(), Ok(Command::Draw));
        assert_eq!("winners".parse::<Command>(), Ok(Command::Winners));
        assert_eq!("pot".parse::<Command>(), Ok(Command::Pot));
        assert_eq!("exit".parse::<Command>(), Ok(Command::Exit));
        assert_eq!(
            "purchase Dave".parse::<Command>(),
            Ok(Command::Purchase("Dave".to_owned()))
        );
        assert_eq!(
            "purchase   Dave Smith".parse::<Command>(),
            Ok(Command::Purchase("Dave Smith".to_owned()))
        );
        assert_eq!("purchase".parse::<Command>(), Ok(Command::Purchase(String::new())));
        assert_eq!(
            "jackpot".parse::<Command>(),
            Err("Unknown command: \"jackpot\"".to_owned())
        );
    }

    #[test]
    fn test_purchase() {
        let mut shell = new_shell(0);
        let flow = shell
            .execute(Command::Purchase("Dave".to_owned()))
            .unwrap();
        assert!(flow.is_continue());
        assert!(output(&shell).starts_with("Ticket "));
        assert!(output(&shell).ends_with(" was purchased by Dave.\n"));
        assert_eq!(shell.series.lock().get_pot(), INITIAL_POT + TICKET_PRICE);

        shell.execute(Command::Purchase("  ".to_owned())).unwrap();
        assert!(output(&shell).ends_with("The buyer's name is expected to be a non-empty string.\n"));
    }

    #[test]
    fn test_winners_before_and_after_draw() {
        let mut shell = new_shell(0);
        shell.execute(Command::Winners).unwrap();
        assert_eq!(output(&shell), "There is not any previous draw.\n");

        shell.execute(Command::Draw).unwrap();
        shell.execute(Command::Winners).unwrap();
        let out = output(&shell);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[1].starts_with("Lottery draw: ["));
        assert_eq!(lines[3], "1st ball\t2nd ball\t3rd ball");
        assert_eq!(lines[4].split('\t').count(), NB_WINNERS);
    }

    #[test]
    fn test_run_session() {
        let mut shell = new_shell(3);
        let input = "\npurchase Remy\nfoo\npot\nexit\npurchase Greg\n";
        shell.run(input.as_bytes()).unwrap();

        let out = output(&shell);
        assert!(out.starts_with("Welcome to the Lottery!\nThe current pot is: 200$\n"));
        assert!(out.contains("purchase %buyer's first name%\tPurchase a ticket (10$)\n"));
        assert!(out.contains(" was purchased by Remy.\n"));
        assert!(out.contains("Unknown command: \"foo\"\n"));
        assert!(out.contains("The current pot is: 210$\n"));
        assert!(out.ends_with("Closing the application, the current pot is: 210$\n"));
        // Nothing is read after `exit`
        assert!(!out.contains("Greg"));
    }

    #[test]
    fn test_run_until_end_of_input() {
        let mut shell = new_shell(3);
        shell.run("purchase Dave\n".as_bytes()).unwrap();
        assert!(output(&shell).ends_with("Closing the application, the current pot is: 210$\n"));
    }
}
