//! Interactive session command loop
//!
//! Reads one line at a time, dispatches to the store/codec/persistence
//! layers, and owns the single live [`PersonStore`]. Generic over the input
//! and output streams so tests can drive whole sessions in-process.
//!
//! Every line is trimmed and case-folded as a whole before dispatch
//! (arguments included); the sub-prompts of `add` take input verbatim.
//! Command failures are reported to the error stream and never leave the
//! loop; only `exit` and end-of-input do.

use std::io::{BufRead, Write};

use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::date;
use crate::error::{Error, Result};
use crate::persist;
use crate::person::{Person, PersonStore};
use crate::table;

const START_BANNER: &str = "Программа запущена, введите help для просмотра команд!";
const NO_MATCH_NOTICE: &str = "Людей, чьи дни рождения приходятся на этот месяц нет!";

const HELP_TEXT: &str = "\
Список доступных команд:
add - добавить человека;
list - вывести список людей;
select <месяц> ('Январь' / '01') - запросить людей, чьи дни рождения приходятся на указанный месяц;
save <имя_файла.json> - сохранить список людей в json
load <имя_файла.json> - загрузить список людей из json
help - отобразить справку;
exit - завершить работу с программой.";

/// One interactive session over a pair of output streams and an input.
pub struct Session<R, O, E> {
    input: R,
    out: O,
    err: E,
    store: PersonStore,
    prompt: String,
    ignore_file: String,
}

impl<R: BufRead, O: Write, E: Write> Session<R, O, E> {
    pub fn new(config: &AppConfig, input: R, out: O, err: E) -> Self {
        Self {
            input,
            out,
            err,
            store: PersonStore::new(),
            prompt: config.session.prompt.clone(),
            ignore_file: config.storage.ignore_file.clone(),
        }
    }

    /// Run the loop until `exit` or end-of-input.
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.out, "{START_BANNER}")?;

        loop {
            write!(self.out, "{}", self.prompt)?;
            self.out.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                debug!("End of input, leaving session");
                break;
            }

            let command = line.trim().to_lowercase();
            debug!(command = %command, "Command dispatched");

            if command == "exit" {
                break;
            } else if command == "add" {
                self.cmd_add()?;
            } else if command == "list" {
                writeln!(self.out, "{}", table::render(self.store.all()))?;
            } else if let Some(month) = command.strip_prefix("select ") {
                self.cmd_select(month)?;
            } else if let Some(target) = command.strip_prefix("save ") {
                self.cmd_save(target)?;
            } else if let Some(target) = command.strip_prefix("load ") {
                self.cmd_load(target)?;
            } else if command == "help" {
                writeln!(self.out, "{HELP_TEXT}")?;
            } else {
                writeln!(self.err, "Неизвестная команда: {command}")?;
            }
        }

        Ok(())
    }

    /// `add`: three sub-prompts, then store the person.
    ///
    /// Sub-prompt input is not case-folded. A malformed date is reported and
    /// the person is skipped; the loop continues.
    fn cmd_add(&mut self) -> Result<()> {
        let name = self.prompt_field("Введите фамилию и имя через пробел: ")?;
        let phone = self.prompt_field("Введите номер телефона: ")?;
        let birth_text = self.prompt_field("Введите дату рождения (01.01.2077): ")?;

        match date::parse_date(&birth_text) {
            Ok(birth) => {
                self.store.add(Person { name, phone, birth });
                debug!(entries = self.store.len(), "Person added");
            }
            Err(e) => {
                warn!(text = %birth_text, "Rejected birth date");
                writeln!(self.err, "{e}")?;
            }
        }
        Ok(())
    }

    /// `select <month>`: the argument is the whole remainder of the line.
    fn cmd_select(&mut self, month: &str) -> Result<()> {
        let month_code = date::normalize_month(month);
        let selected = self.store.filter_by_month(&month_code);
        if selected.is_empty() {
            writeln!(self.out, "{NO_MATCH_NOTICE}")?;
        } else {
            writeln!(self.out, "{}", table::render(&selected))?;
        }
        Ok(())
    }

    /// `save <file>`: the target is rebuilt from the first two dot-separated
    /// segments only, so `save a.json.bak` writes `a.json`. A remainder
    /// without a dot cannot carry the json extension and is reported as such.
    fn cmd_save(&mut self, target: &str) -> Result<()> {
        let mut parts = target.split('.');
        let file_name = match (parts.next(), parts.next()) {
            (Some(stem), Some(ext)) => format!("{stem}.{ext}"),
            _ => {
                writeln!(self.err, "{}", Error::invalid_extension(target))?;
                return Ok(());
            }
        };

        if let Err(e) = persist::save(&file_name, &self.store, &self.ignore_file) {
            warn!(error = %e.format_for_log(), "Save failed");
            writeln!(self.err, "{e}")?;
        }
        Ok(())
    }

    /// `load <file>`: on success the store is replaced wholesale (an empty
    /// array yields an empty store); on failure it stays untouched.
    fn cmd_load(&mut self, target: &str) -> Result<()> {
        match persist::load(target) {
            Ok(people) => self.store.replace(people),
            Err(e) => {
                warn!(error = %e.format_for_log(), "Load failed");
                writeln!(self.err, "{e}")?;
            }
        }
        Ok(())
    }

    fn prompt_field(&mut self, prompt: &str) -> Result<String> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;

        let mut line = String::new();
        self.input.read_line(&mut line)?;
        // Strip only the line terminator; the value itself is kept as typed
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(line)
    }

    #[cfg(test)]
    fn store(&self) -> &PersonStore {
        &self.store
    }
}
