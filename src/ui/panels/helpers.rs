use crate::app::AnnotatorApp;

/// Handle manual song number input when user presses Enter
/// Returns true if the input was processed successfully
pub fn handle_manual_index_input(
    app: &mut AnnotatorApp,
    new_index_str: &str,
    current_display: &str,
) -> bool {
    if let Ok(position) = new_index_str.trim().parse::<usize>() {
        if app.jump_to_position(position) {
            app.ui.manual_index_input = position.to_string();
            return true;
        }
    }

    // Reset to current valid value if invalid input or out of range
    app.ui.manual_index_input = current_display.to_string();
    false
}
