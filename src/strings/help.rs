pub const SHELL_BANNER: &str = "intent-shell: describe what you want done, `.help` for help, `.exit` to quit.";

pub const SHELL_PROMPT: &str = "> ";

pub const SHELL_HELP: &str = "\
Type a request in plain language, for example:
  list all files in detail
  create an empty file named notes.txt
  make a directory called build/out
  refactor the script named utils.py
  show me the git status

Shell commands:
  .help          Show this message
  .exit, .quit   Leave the shell";
