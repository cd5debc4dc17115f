//! Fixed strings printed by the console and the script runner.

/// Printed before every line read by the console.
pub const PROMPT: &str = ">>> ";

/// Trimmed input lines that end the console session.
pub const EXIT_KEYWORDS: [&str; 2] = ["exit()", "toka()"];

/// Printed once when the user leaves the console.
pub const FAREWELL: &str = "✨🅺🅰🆁🅸🅱🆄 🆃🅴🅽🅰✨";

/// Header line that precedes a batch of parse errors.
pub const ERROR_HEADER: &str = "Kuna Errors Zifuatazo:";

/// Indentation unit for each reported error message.
pub const INDENT: &str = "\t";

/// Block-art face shown (in red) when a script fails to parse.
pub const ERROR_FACE: &str = "
	███████████████████████████
	███████▀▀▀░░░░░░░▀▀▀███████
	████▀░░░░░░░░░░░░░░░░░▀████
	███│░░░░░░░░░░░░░░░░░░░│███
	██▌│░░░░░░░░░░░░░░░░░░░│▐██
	██░└┐░░░░░░░░░░░░░░░░░┌┘░██
	██░░└┐░░░░░░░░░░░░░░░┌┘░░██
	██░░┌┘▄▄▄▄▄░░░░░▄▄▄▄▄└┐░░██
	██▌░│██████▌░░░▐██████│░▐██
	███░│▐███▀▀░░▄░░▀▀███▌│░███
	██▀─┘░░░░░░░▐█▌░░░░░░░└─▀██
	██▄░░░▄▄▄▓░░▀█▀░░▓▄▄▄░░░▄██
	████▄─┘██▌░░░░░░░▐██└─▄████
	█████░░▐█─┬┬┬┬┬┬┬─█▌░░█████
	████▌░░░▀┬┼┼┼┼┼┼┼┬▀░░░▐████
	█████▄░░░└┴┴┴┴┴┴┴┘░░░▄█████
	███████▄░░░░░░░░░░░▄███████
	██████████▄▄▄▄▄▄▄██████████
	███████████████████████████

  █▄▀ █░█ █▄░█ ▄▀█   █▀ █░█ █ █▀▄ ▄▀█
  █░█ █▄█ █░▀█ █▀█   ▄█ █▀█ █ █▄▀ █▀█

";

/// Logo shown by the binary before the console starts.
pub const LOGO: &str = "
█░░ █░█ █▀▀ █░█ ▄▀█   █▄█ ▄▀█
█▄▄ █▄█ █▄█ █▀█ █▀█   ░█░ █▀█

    █▄░█ █░█ █▀█ █░█
    █░▀█ █▄█ █▀▄ █▄█
";

/// Usage hint printed under the logo.
pub const CONSOLE_HINT: &str =
    "Andika 'exit()' au 'toka()' kuondoka. Tumia 'nuru --docs' kusoma nyaraka.";

/// Returns `true` if `line`, once trimmed, is one of the [`EXIT_KEYWORDS`].
pub fn is_exit_keyword(line: &str) -> bool {
    let trimmed = line.trim();
    EXIT_KEYWORDS.contains(&trimmed)
}
