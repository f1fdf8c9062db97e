
mod diagram_viewer_tests;
mod workflow_controller_tests;
