//! Welcome banner art

/// Block-letter banner shown by `welcome` and as the `neofetch` logo
pub const LOGO: &str = concat!(
    " ███████████                                                ██████████\n",
    "░░███░░░░░███                                              ░░███░░░░███\n",
    " ░███    ░███   ██████   █████ █████  ██████  ████████      ░███   ░░███  ██████  █████ █████\n",
    " ░██████████   ░░░░░███ ░░███ ░░███  ███░░███░░███░░███     ░███    ░███ ███░░███░░███ ░░███\n",
    " ░███░░░░░███   ███████  ░███  ░███ ░███ ░███ ░███ ░███     ░███    ░███░███████  ░███  ░███\n",
    " ░███    ░███  ███░░███  ░░███ ███  ░███ ░███ ░███ ░███     ░███    ███ ░███░░░   ░░███ ███\n",
    " █████   █████░░████████  ░░█████   ░░██████  ████ █████ ██ ██████████  ░░██████   ░░█████\n",
    "░░░░░   ░░░░░  ░░░░░░░░    ░░░░░     ░░░░░░  ░░░░ ░░░░░ ░░ ░░░░░░░░░░    ░░░░░░     ░░░░░",
);

pub const WELCOME_TEXT: &str = "Welcome to my website!";
pub const WELCOME_HINT: &str = "Type 'contact' to get in touch, and 'help' for more commands to try.";
pub const WELCOME_DIVIDER: &str = "══════════════════════════════════════";
