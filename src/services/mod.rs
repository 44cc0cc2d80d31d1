pub mod cash_flow_plot;
pub mod histogram;
pub mod percentiles;
pub mod roll_forward;
pub mod scenario_yaml;
pub mod sensitivity;
pub mod simulation;
pub mod simulation_types;
pub mod triangular_sampler;
