pub mod organizer_handler;
