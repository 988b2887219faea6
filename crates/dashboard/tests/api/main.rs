mod dashboard;
mod helpers;
