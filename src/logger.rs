use crate::{Grammar, Log};
use std::fmt::{Display, Formatter};

#[cfg(debug_assertions)]
use crate::{Code, ParsedResult};

impl<T: Display> Display for Log<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Log::None => Ok(()),
            Log::Default(s) | Log::Success(s) | Log::Result(s) | Log::Verbose(s) => {
                write!(f, "{}", s)
            }
        }
    }
}

impl<T> Log<T> {
    /// Function which return order of the log.
    pub fn order(&self) -> u8 {
        match self {
            Log::None => 0,
            Log::Default(_) => 1,
            Log::Success(_) => 2,
            Log::Result(_) => 3,
            Log::Verbose(_) => 4,
        }
    }
}

impl Grammar {
    /// Set a log label to debug the grammar based on the level of [Log].
    pub fn set_log(&self, debugger: Log<&'static str>) -> Result<(), String> {
        self.debugger
            .set(debugger)
            .map_err(|err| format!("Debugger {} is already set for this grammar.", err))
    }

    #[cfg(debug_assertions)]
    pub(crate) fn log_entry(&self, name: &str, index: usize, code: &Code) {
        if let Some(debugger) = self.debugger.get() {
            if debugger.order() >= Log::Verbose(()).order() {
                println!(
                    "[{}; Entering]: {} at {}",
                    debugger,
                    name,
                    code.obtain_position(index)
                );
            }
        }
    }

    #[cfg(debug_assertions)]
    pub(crate) fn log_result<'c>(
        &self,
        name: &str,
        index: usize,
        code: &Code,
        result: &ParsedResult<'c>,
    ) {
        if let Some(debugger) = self.debugger.get() {
            match result {
                Some(data) => {
                    if debugger.order() >= Log::Success(()).order() {
                        println!(
                            "[{}; ProductionSuccess]: {} consumed up to {}",
                            debugger,
                            name,
                            code.obtain_position(data.consumed_index)
                        );
                    }
                }
                None => {
                    if debugger.order() >= Log::Result(()).order() {
                        println!(
                            "[{}; ProductionError]: {} at {}",
                            debugger,
                            name,
                            code.obtain_position(index)
                        );
                    }
                }
            }
        }
    }
}
