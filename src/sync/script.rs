//! Apps Script receiver
//!
//! Deployed as a web app bound to the target spreadsheet. Each push clears
//! and rewrites the three sheets from the posted snapshot.

pub const APPS_SCRIPT_TEMPLATE: &str = r#"function doPost(e) {
  var ss = SpreadsheetApp.getActiveSpreadsheet();
  var data = JSON.parse(e.postData.contents);
  var payload = data.data;

  var sheetIncome = ss.getSheetByName("Direct_Incomes") || ss.insertSheet("Direct_Incomes");
  sheetIncome.clear();
  sheetIncome.appendRow(["Date", "Amount", "Source", "Paid By", "Mode", "Remarks"]);
  payload.incomes.forEach(function(i) {
    sheetIncome.appendRow([i.date, i.amount, i.source, i.paidBy, i.mode, i.remarks]);
  });

  var sheetExpense = ss.getSheetByName("Expenses") || ss.insertSheet("Expenses");
  sheetExpense.clear();
  sheetExpense.appendRow(["Date", "Amount", "Category", "Paid To", "Payment Source", "Mode", "Notes"]);
  payload.expenses.forEach(function(x) {
    sheetExpense.appendRow([x.date, x.amount, x.category, x.paidTo, x.paidBy, x.mode, x.notes]);
  });

  var sheetPayments = ss.getSheetByName("Labour_Payments") || ss.insertSheet("Labour_Payments");
  sheetPayments.clear();
  sheetPayments.appendRow(["Date", "Labour Name", "Amount", "Paid From", "Mode", "Type"]);
  payload.payments.forEach(function(p) {
    var worker = payload.labours.find(function(l) { return String(l.id) === String(p.labourId); });
    sheetPayments.appendRow([p.date, worker ? worker.name : "Unknown", p.amount, p.paidBy, p.mode, p.type]);
  });

  return ContentService.createTextOutput("Success").setMimeType(ContentService.MimeType.TEXT);
}
"#;

/// Steps shown next to the template
pub const SETUP_STEPS: &[&str] = &[
    "Open the spreadsheet, then Extensions > Apps Script.",
    "Replace the editor contents with the script below and save.",
    "Deploy > New deployment > Web app; execute as yourself, access: Anyone.",
    "Run doPost once from the editor and grant the permissions it asks for.",
    "Copy the web app URL and run `sitebook settings set sync-url <URL>`.",
];
