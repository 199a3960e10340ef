mod admin_console_steps;
mod common_steps;
mod player_progress_steps;
mod propagation_steps;
mod unlock_request_steps;
