//! Числовые коды сервиса налоговых документов eAPI.

use crate::coded_enum;

coded_enum! {
    /// Категория налогового документа
    pub enum InvoiceCategory {
        GoodsService = 1 => "მიწოდება/მომსახურება",
        Wood = 2 => "ხე-ტყე",
        Petroleum = 3 => "ნავთობპროდუქტები",
        Advance = 4 => "ავანსი",
    }
}

coded_enum! {
    /// Тип налогового документа
    pub enum InvoiceType {
        InnerTransport = 1 => "შიდა გადაზიდვა",
        WithTransport = 2 => "ტრანსპორტირებით",
        WithoutTransport = 3 => "ტრანსპორტირების გარეშე",
        Distribution = 4 => "დისტრიბუცია",
        Return = 5 => "უკან დაბრუნება",
        Advance = 6 => "ავანსი",
        Retail = 7 => "საცალო მიწოდებისთვის",
        Wholesale = 8 => "საბითუმო მიწოდებისთვის",
        /// Импорт: перевозка до таможенного склада
        ImportTransport = 9 => "იმპორტირებისას ტრანსპორტირებისათვის",
        /// Экспорт: перевозка с таможенного склада
        ExportTransport = 10 => "ექსპორტისას ტრანსპორტირებისათვის",
        Service = 11 => "მომსახურება",
    }
}

coded_enum! {
    pub enum InvoiceVatType {
        Standard = 0 => "ჩვეულებრივი",
        ZeroRate = 1 => "ნულოვანი",
        Exempt = 2 => "დაუბეგრავი",
    }
}

coded_enum! {
    /// Фильтр `TYPE` метода `ListInvoices`. Двузначные коды выбирают документы,
    /// которые можно прикрепить к декларации.
    pub enum InvoiceListType {
        SellerDocs = 1 => "თქვენს მიერ გამოწერილი დოკუმენტები",
        SellerDecl = 10 => "თქვენს მიერ გამოწერილი დეკლარაციებზე მისაბმელი დოკუმენტები",
        BuyerDocs = 2 => "თქვენზე გამოწერილი დოკუმენტები",
        BuyerDecl = 20 => "თქვენზე გამოწერილი დეკლარაციებზე მისაბმელი დოკუმენტები",
        SentToDecl = 21 => "თქვენზე როგორც გადამზიდავზე გამოწერილი დოკუმენტები",
        Templates = 3 => "შაბლონები",
        TemplatesDecl = 30 => "შაბლონები დეკლარაციისთვის",
        AdvanceWithBalance = 5 => "ავანსის დოკუმენტები დარჩენილი ბალანსით",
        AdvanceBalanceDecl = 50 => "ავანსის დოკუმენტები დარჩენილი ბალანსით დეკლარაციისთვის",
    }
}

coded_enum! {
    /// Причина корректировки
    pub enum CorrectReason {
        None = 0 => "არ არის",
        WrongAmount = 1 => "გაუქმებულია დასაბეგრი ოპერაციის თანხა",
        WrongGoods = 2 => "შეცვლილია დასაბეგრი ოპერაციის სახე",
        WrongTin = 3 => "შეცვლილია ადრე შეთანხმებული კომპენსაციის თანხა",
        WrongDate = 4 => "საქონელი ან ნაწილობრივ უბრუნდება გამყიდველს",
        WrongAddress = 5 => "რედაქტირება",
        Other = 6 => "სხვა",
    }
}

coded_enum! {
    pub enum ReturnType {
        Partial = 0 => "ნაწილობრივი",
        Full = 1 => "სრული",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoice_type_codes_are_contiguous() {
        let codes: Vec<i32> = InvoiceType::all().iter().map(InvoiceType::code).collect();
        assert_eq!(codes, (1..=11).collect::<Vec<_>>());
    }

    #[test]
    fn test_list_type_two_digit_codes() {
        assert_eq!(InvoiceListType::from_code(50), Some(InvoiceListType::AdvanceBalanceDecl));
        assert_eq!(InvoiceListType::SentToDecl.code(), 21);
        assert_eq!(InvoiceListType::from_code(4), None);
    }

    #[test]
    fn test_into_i32() {
        let code: i32 = InvoiceCategory::Petroleum.into();
        assert_eq!(code, 3);
    }
}
