mod scraper_tests;
mod spreadsheet_tests;
mod status_tests;
