pub mod base_commands;
pub mod report_format;
pub mod sensitivity_cmd;
pub mod simulate_cmd;
pub mod template_cmd;
