//! Interactive prompt loop.
//!
//! Each round reads a ticker or company name, resolves it, shows the action
//! menu and runs one action. The only state carried inside a round is the
//! resolved symbol; nothing survives to the next round. Typing `välju` at the
//! symbol prompt, choosing the exit action, or closing stdin ends the loop.
use std::io::{BufRead, Write};

use chrono::NaiveDate;
use log::debug;
use stock_common::symbols;
use stock_common::{Result, StockError};

use crate::market::MarketClient;
use crate::metrics::{self, Portfolio, DEFAULT_PERIOD};
use crate::news::NewsClient;
use crate::transport::HttpSource;

/// Exit keyword at the symbol prompt.
pub const EXIT_KEYWORD: &str = "välju";
/// Ends portfolio entry.
pub const DONE_KEYWORD: &str = "lõpeta";

const DATE_FORMAT: &str = "%Y-%m-%d";
const SYMBOL_PROMPT: &str =
    "\nSisestage börsi sümbol või ettevõtte nimi (või 'välju' lõpetamiseks): ";
const GOODBYE: &str = "Tänan kasutamast! Head päeva!";
const MENU: &str = "\nValige, mida soovite teha:
1. Vaata aktsiahinda
2. Vaata ajaloolisi andmeid
3. Arvuta liikuv keskmine
4. Võrdle kahte aktsiat
5. Vaata aktsia uudiseid
6. Arvuta portfelli väärtus
7. Välju";

enum Flow {
    Continue,
    Exit,
}

/// Console front end over the market and news clients.
pub struct Shell<R, W, H> {
    input: R,
    output: W,
    market: MarketClient<H>,
    news: NewsClient<H>,
}

impl<R: BufRead, W: Write, H: HttpSource> Shell<R, W, H> {
    /// Create a shell reading from `input` and printing to `output`.
    pub fn new(input: R, output: W, market: MarketClient<H>, news: NewsClient<H>) -> Self {
        Shell {
            input,
            output,
            market,
            news,
        }
    }

    /// Runs rounds until the user exits. Only I/O errors on the console
    /// itself are returned; lookup failures are printed and the loop goes on.
    pub fn run(&mut self) -> Result<()> {
        self.welcome()?;
        loop {
            let Some(input) = self.prompt(SYMBOL_PROMPT)? else {
                break;
            };
            if input.to_lowercase() == EXIT_KEYWORD {
                break;
            }
            if input.is_empty() {
                continue;
            }

            let symbol = symbols::resolve(&input);
            debug!("Resolved {:?} to {}", input, symbol);

            writeln!(self.output, "{MENU}")?;
            let Some(choice) = self.prompt("Valik: ")? else {
                break;
            };
            if let Flow::Exit = self.dispatch(&choice, &symbol)? {
                break;
            }
        }
        writeln!(self.output, "{GOODBYE}")?;
        Ok(())
    }

    fn welcome(&mut self) -> Result<()> {
        writeln!(self.output, "Tere tulemast aktsiahinna otsingusse!")?;
        writeln!(
            self.output,
            "Sisestage börsi sümbol või ettevõtte nimi (näiteks: AAPL, MSFT, Apple, Tesla)"
        )?;
        writeln!(self.output, "\nSaadaval ettevõtted:")?;
        for company in symbols::companies() {
            writeln!(self.output, "- {} ({})", company.display_name(), company.ticker())?;
        }
        Ok(())
    }

    fn dispatch(&mut self, choice: &str, symbol: &str) -> Result<Flow> {
        debug!("Action {:?} for {}", choice, symbol);
        match choice {
            "1" => self.show_quote(symbol),
            "2" => self.show_history(symbol),
            "3" => self.show_moving_average(symbol),
            "4" => self.show_comparison(symbol),
            "5" => self.show_news(symbol),
            "6" => self.show_portfolio(),
            "7" => Ok(Flow::Exit),
            other => {
                writeln!(self.output, "Tundmatu valik: {other}")?;
                Ok(Flow::Continue)
            }
        }
    }

    fn show_quote(&mut self, symbol: &str) -> Result<Flow> {
        match self.market.quote(symbol) {
            Ok(quote) => {
                writeln!(self.output, "\nAktsia: {}", quote.symbol)?;
                writeln!(self.output, "Hind: ${}", quote.price)?;
                writeln!(
                    self.output,
                    "Muutus: ${} ({})",
                    quote.change, quote.change_percent
                )?;
            }
            Err(e) => self.print_error(&e)?,
        }
        Ok(Flow::Continue)
    }

    fn show_history(&mut self, symbol: &str) -> Result<Flow> {
        let Some(start) = self.prompt("Sisestage alguskuupäev (YYYY-MM-DD): ")? else {
            return Ok(Flow::Exit);
        };
        let Some(end) = self.prompt("Sisestage lõppkuupäev (YYYY-MM-DD): ")? else {
            return Ok(Flow::Exit);
        };
        let (start, end) = match parse_date(&start).and_then(|s| Ok((s, parse_date(&end)?))) {
            Ok(bounds) => bounds,
            Err(e) => {
                self.print_error(&e)?;
                return Ok(Flow::Continue);
            }
        };

        match metrics::historical_range(&self.market, symbol, &start, &end) {
            Ok(range) if range.is_empty() => {
                writeln!(self.output, "Valitud vahemikus andmeid ei ole")?;
            }
            Ok(range) => {
                writeln!(self.output, "Ajaloolised andmed aktsiale {symbol}:")?;
                for (date, bar) in &range {
                    writeln!(self.output, "{date}: {}", bar.close)?;
                }
            }
            Err(e) => self.print_error(&e)?,
        }
        Ok(Flow::Continue)
    }

    fn show_moving_average(&mut self, symbol: &str) -> Result<Flow> {
        let Some(raw) = self.prompt(&format!("Sisestage periood (nt {DEFAULT_PERIOD}): "))? else {
            return Ok(Flow::Exit);
        };
        let period = if raw.is_empty() {
            Ok(DEFAULT_PERIOD)
        } else {
            raw.parse::<usize>()
                .map_err(|_| StockError::Format(format!("vigane periood '{raw}'")))
        };

        match period.and_then(|p| metrics::moving_average(&self.market, symbol, p).map(|avg| (p, avg))) {
            Ok((period, average)) => writeln!(
                self.output,
                "{symbol} liikuv keskmine ({period} päeva): {average:.4}"
            )?,
            Err(e) => self.print_error(&e)?,
        }
        Ok(Flow::Continue)
    }

    fn show_comparison(&mut self, symbol: &str) -> Result<Flow> {
        let Some(other) = self.prompt("Sisestage teine aktsia sümbol: ")? else {
            return Ok(Flow::Exit);
        };
        let other = symbols::resolve(&other);

        match metrics::compare(&self.market, symbol, &other) {
            Ok(cmp) => {
                writeln!(self.output, "Aktsiad {} vs {}:", cmp.symbol1, cmp.symbol2)?;
                writeln!(self.output, "{}: {}", cmp.symbol1, cmp.price1)?;
                writeln!(self.output, "{}: {}", cmp.symbol2, cmp.price2)?;
            }
            Err(e) => self.print_error(&e)?,
        }
        Ok(Flow::Continue)
    }

    fn show_news(&mut self, symbol: &str) -> Result<Flow> {
        let articles = self.news.articles(symbol);
        if articles.is_empty() {
            writeln!(self.output, "Uudiseid ei leitud")?;
            return Ok(Flow::Continue);
        }
        writeln!(self.output, "\n{symbol} aktsia uudised:")?;
        for article in &articles {
            let na = stock_common::quote::NOT_AVAILABLE;
            writeln!(self.output, "\nPealkiri: {}", article.title.as_deref().unwrap_or(na))?;
            writeln!(self.output, "Kokkuvõte: {}", article.description.as_deref().unwrap_or(na))?;
            writeln!(self.output, "Link: {}", article.url.as_deref().unwrap_or(na))?;
        }
        Ok(Flow::Continue)
    }

    fn show_portfolio(&mut self) -> Result<Flow> {
        let mut portfolio = Portfolio::new();
        loop {
            let Some(entry) = self.prompt("Sisestage aktsia sümbol või 'lõpeta' lõpetamiseks: ")? else {
                return Ok(Flow::Exit);
            };
            if entry.to_lowercase() == DONE_KEYWORD {
                break;
            }
            if entry.is_empty() {
                continue;
            }
            let stock = symbols::resolve(&entry);
            let Some(raw) = self.prompt(&format!("Kui palju {stock} aktsiaid on teil? "))? else {
                return Ok(Flow::Exit);
            };
            match raw.parse::<i64>() {
                Ok(quantity) => {
                    portfolio.set(stock, quantity);
                }
                Err(_) => {
                    let e = StockError::Format(format!("vigane kogus '{raw}'"));
                    self.print_error(&e)?;
                }
            }
        }

        let valuation = metrics::portfolio_value(&self.market, &portfolio);
        for symbol in &valuation.skipped {
            writeln!(self.output, "Viga aktsia {symbol} hinna saamisel.")?;
        }
        writeln!(self.output, "Portfelli koguväärtus: ${:.2}", valuation.total)?;
        Ok(Flow::Continue)
    }

    /// Prints `text`, reads one line. `None` when input is exhausted.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn print_error(&mut self, e: &StockError) -> Result<()> {
        writeln!(self.output, "Viga: {e}")?;
        Ok(())
    }
}

/// Parses a prompt date and returns it zero-padded, so it compares
/// correctly against the provider's `YYYY-MM-DD` keys.
fn parse_date(raw: &str) -> Result<String> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map(|date| date.format(DATE_FORMAT).to_string())
        .map_err(|_| StockError::Format(format!("vigane kuupäev '{raw}' (oodatud YYYY-MM-DD)")))
}
